//! The same workload through each policy, chosen only by `Policy`.
//!
//! Run with: cargo run --example swap_policy

use bytecache::builder::{Policy, StoreBuilder};
use bytecache::policy::lfu::Weighting;
use bytecache::traits::CacheStore;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let policies = [
        Policy::Fifo,
        Policy::lfu(),
        Policy::Lfu(Weighting::CountAccesses),
    ];

    for policy in policies {
        let mut store = StoreBuilder::new(64)
            .on_evicted(|key: &u32, _: &String| tracing::info!(key, "evicted"))
            .build(policy);

        for round in 0..4u32 {
            for key in 0..8u32 {
                if store.get(&(key % 3)).is_none() {
                    store.set(key % 3, format!("hot-{key:04}"));
                }
                store.set(100 + round * 8 + key, format!("cold-{key:04}"));
            }
        }

        let m = store.metrics();
        println!(
            "{:?}: len {}, used {} / {} bytes, hit ratio {:.2}, evictions {}",
            store.policy(),
            store.len(),
            store.used_bytes(),
            store.max_bytes(),
            m.hit_ratio(),
            m.evictions
        );
    }
}
