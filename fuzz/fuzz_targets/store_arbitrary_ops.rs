#![no_main]

use std::cell::Cell;
use std::rc::Rc;

use bytecache::builder::{Policy, StoreBuilder};
use bytecache::policy::lfu::Weighting;
use bytecache::traits::CacheStore;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on every policy
//
// The first byte picks the policy and the byte budget; the rest is a stream
// of (op, key, size) triples over set, get, del and del_oldest. After each
// step the store must pass its invariant check, and the listener count must
// equal the number of entries that left.
fuzz_target!(|data: &[u8]| {
    let Some((&header, ops)) = data.split_first() else {
        return;
    };

    let policy = match header % 3 {
        0 => Policy::Fifo,
        1 => Policy::Lfu(Weighting::Fixed),
        _ => Policy::Lfu(Weighting::CountAccesses),
    };
    let max_bytes = usize::from(header / 3) * 4;

    let evicted = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&evicted);
    let mut store = StoreBuilder::new(max_bytes)
        .on_evicted(move |_: &u8, _: &Vec<u8>| counter.set(counter.get() + 1))
        .build(policy);

    let mut inserted = 0usize;
    for chunk in ops.chunks_exact(3) {
        let key = chunk[1] % 32;
        let size = usize::from(chunk[2] % 64);

        match chunk[0] % 4 {
            0 => {
                let existed = store.contains(&key);
                let before = store.used_bytes();
                let previous = store.set(key, vec![0; size]);
                assert_eq!(previous.is_some(), existed);
                if !existed {
                    inserted += 1;
                }
                if let Some(old) = previous {
                    assert_eq!(store.used_bytes(), before - old.len() + size);
                }
            },
            1 => {
                let present = store.contains(&key);
                assert_eq!(store.get(&key).is_some(), present);
            },
            2 => {
                let before = store.used_bytes();
                if let Some(value) = store.del(&key) {
                    assert_eq!(store.used_bytes(), before - value.len());
                }
                assert!(!store.contains(&key));
            },
            _ => {
                let expected = store.peek_oldest().map(|(k, _)| *k);
                let removed = store.del_oldest().map(|(k, _)| k);
                assert_eq!(removed, expected);
            },
        }

        if let Err(err) = store.check_invariants() {
            panic!("invariant violated: {err}");
        }
        assert_eq!(inserted, store.len() + evicted.get());
    }
});
