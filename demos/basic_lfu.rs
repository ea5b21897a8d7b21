//! LFU store in both weighting modes.
//!
//! Run with: RUST_LOG=debug cargo run --example basic_lfu

use bytecache::config::StoreConfig;
use bytecache::policy::lfu::{LfuStore, Weighting};
use bytecache::traits::CacheStore;
use tracing_subscriber::EnvFilter;

fn run(weighting: Weighting) {
    println!("== {weighting:?} ==");
    let mut store = LfuStore::new(StoreConfig::new(3)).with_weighting(weighting);

    store.set("a", 1u8);
    store.set("b", 2u8);
    store.set("c", 3u8);

    // Read "a" often; only counting mode remembers it.
    for _ in 0..5 {
        store.get(&"a");
    }
    for key in ["a", "b", "c"] {
        println!("   weight({key}) = {:?}", store.weight(&key));
    }

    store.set("d", 4u8);
    println!("   after inserting \"d\": a={} b={}", store.contains(&"a"), store.contains(&"b"));
    println!("   next to go: {:?}", store.peek_oldest().map(|(k, _)| *k));
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    run(Weighting::Fixed);
    run(Weighting::CountAccesses);

    println!("== explicit weights ==");
    let mut store = LfuStore::new(StoreConfig::unbounded());
    store.set("pinned", 0u8);
    store.set("plain", 0u8);
    store.set_weight(&"pinned", 10);
    println!("   del_oldest -> {:?}", store.del_oldest());
}
