use bytecache::config::StoreConfig;
use bytecache::policy::fifo::FifoStore;
use bytecache::traits::CacheStore;
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};

fn bench_fifo_set_get(c: &mut Criterion) {
    c.bench_function("fifo_set_get", |b| {
        b.iter(|| {
            let mut store = FifoStore::new(StoreConfig::unbounded());
            for i in 0..1024u64 {
                store.set(i, i);
            }
            for i in 0..1024u64 {
                let _ = std::hint::black_box(store.get(&i));
            }
        })
    });
}

/// Every insert past the warm-up evicts exactly one entry.
fn bench_fifo_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("fifo_eviction");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("set_over_budget", |b| {
        b.iter_batched(
            || {
                let mut store = FifoStore::new(StoreConfig::new(1024 * 64));
                for i in 0..1024u64 {
                    store.set(i, vec![0u8; 64]);
                }
                store
            },
            |mut store| {
                for i in 1024..1024 + 4096u64 {
                    store.set(i, vec![0u8; 64]);
                }
                std::hint::black_box(store.used_bytes())
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("update_refresh", |b| {
        b.iter_batched(
            || {
                let mut store = FifoStore::new(StoreConfig::unbounded());
                for i in 0..4096u64 {
                    store.set(i, i);
                }
                store
            },
            |mut store| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(store.set(i, i + 1));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_fifo_set_get, bench_fifo_eviction_churn);
criterion_main!(benches);
