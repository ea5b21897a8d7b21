//! FIFO store with a byte budget and an eviction callback.
//!
//! Run with: cargo run --example basic_fifo

use bytecache::config::StoreConfig;
use bytecache::policy::fifo::FifoStore;
use bytecache::traits::CacheStore;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let config = StoreConfig::new(30).on_evicted(|key: &&str, value: &Vec<u8>| {
        println!("   evicted {key} ({} bytes)", value.len());
    });
    let mut store = FifoStore::new(config);

    println!("1. Fill to 20 of 30 bytes");
    store.set("a", vec![0u8; 10]);
    store.set("b", vec![0u8; 10]);
    println!("   used {} / {}", store.used_bytes(), store.max_bytes());

    println!("2. Insert 15 more bytes");
    store.set("c", vec![0u8; 15]);
    println!("   used {} / {}, len {}", store.used_bytes(), store.max_bytes(), store.len());

    println!("3. Update \"b\": it becomes the newest");
    store.set("b", vec![1u8; 5]);
    let order: Vec<_> = store.iter().map(|(k, _)| *k).collect();
    println!("   oldest to newest: {order:?}");

    println!("4. Drain");
    while let Some((key, _)) = store.del_oldest() {
        println!("   removed {key}");
    }
    println!("   metrics: {:?}", store.metrics());
}
