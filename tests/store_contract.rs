// ==============================================
// CROSS-POLICY CONTRACT TESTS (integration)
// ==============================================
//
// Behavior every store must share regardless of eviction policy. Each test
// runs against FIFO and both LFU weighting modes through the public builder.

use std::cell::RefCell;
use std::rc::Rc;

use bytecache::policy::lfu::Weighting;
use bytecache::prelude::*;

const POLICIES: [Policy; 3] = [
    Policy::Fifo,
    Policy::Lfu(Weighting::Fixed),
    Policy::Lfu(Weighting::CountAccesses),
];

type Log = Rc<RefCell<Vec<(String, Vec<u8>)>>>;

fn logged(policy: Policy, max_bytes: usize) -> (Store<String, Vec<u8>>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let store = StoreBuilder::new(max_bytes)
        .on_evicted(move |k: &String, v: &Vec<u8>| sink.borrow_mut().push((k.clone(), v.clone())))
        .build(policy);
    (store, log)
}

fn key(i: usize) -> String {
    format!("k{i}")
}

// ==============================================
// Size Accounting
// ==============================================

mod size_accounting {
    use super::*;

    #[test]
    fn used_bytes_tracks_every_mutation() {
        for policy in POLICIES {
            let mut store = StoreBuilder::<String, Vec<u8>>::new(0).build(policy);
            let mut expected = 0usize;

            for i in 0..20 {
                store.set(key(i), vec![0; i]);
                expected += i;
                assert_eq!(store.used_bytes(), expected, "{policy:?} after set {i}");
            }
            for i in (0..20).step_by(3) {
                store.set(key(i), vec![0; 2 * i]);
                expected += i;
                assert_eq!(store.used_bytes(), expected, "{policy:?} after update {i}");
            }
            for i in (1..20).step_by(4) {
                let removed = store.del(&key(i)).map(|v| v.len()).unwrap_or(0);
                expected -= removed;
                assert_eq!(store.used_bytes(), expected, "{policy:?} after del {i}");
            }
            while let Some((_, v)) = store.del_oldest() {
                expected -= v.len();
                assert_eq!(store.used_bytes(), expected, "{policy:?} draining");
                store.check_invariants().unwrap();
            }
            assert_eq!(store.used_bytes(), 0);
            assert!(store.is_empty());
        }
    }

    #[test]
    fn key_size_is_not_counted() {
        for policy in POLICIES {
            let mut store = StoreBuilder::<String, Vec<u8>>::new(0).build(policy);
            store.set("a-rather-long-key-that-costs-nothing".to_string(), vec![0; 3]);
            assert_eq!(store.used_bytes(), 3);
        }
    }

    #[test]
    fn zero_budget_never_evicts() {
        for policy in POLICIES {
            let (mut store, log) = logged(policy, 0);
            for i in 0..500 {
                store.set(key(i), vec![0; 64]);
            }
            assert_eq!(store.len(), 500);
            assert_eq!(store.used_bytes(), 500 * 64);
            assert!(log.borrow().is_empty());
        }
    }
}

// ==============================================
// Capacity
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn thirty_byte_budget_scenario() {
        for policy in POLICIES {
            let mut store = StoreBuilder::<&str, Vec<u8>>::new(30).build(policy);
            store.set("a", vec![0; 10]);
            store.set("b", vec![0; 10]);
            store.set("c", vec![0; 15]);

            assert!(!store.contains(&"a"), "{policy:?}");
            assert!(store.contains(&"b"));
            assert!(store.contains(&"c"));
            assert_eq!(store.used_bytes(), 25);
            assert_eq!(store.len(), 2);
        }
    }

    #[test]
    fn one_eviction_per_insert_even_when_still_over() {
        for policy in POLICIES {
            let (mut store, log) = logged(policy, 10);
            store.set(key(1), vec![1; 3]);
            store.set(key(2), vec![2; 3]);
            store.set(key(3), vec![3; 3]);
            store.set(key(4), vec![4; 20]);

            assert_eq!(log.borrow().len(), 1, "{policy:?}");
            assert_eq!(log.borrow()[0].0, key(1));
            assert_eq!(store.used_bytes(), 26);
            assert!(store.used_bytes() > store.max_bytes());
            assert_eq!(store.metrics().evictions, 1);
        }
    }

    #[test]
    fn oversized_insert_into_empty_store_evicts_itself() {
        for policy in POLICIES {
            let (mut store, log) = logged(policy, 4);
            assert_eq!(store.set(key(0), vec![9; 5]), None);
            assert!(store.is_empty(), "{policy:?}");
            assert_eq!(*log.borrow(), vec![(key(0), vec![9; 5])]);
        }
    }

    #[test]
    fn growing_update_defers_eviction_to_next_insert() {
        for policy in POLICIES {
            let (mut store, log) = logged(policy, 10);
            store.set(key(1), vec![0; 5]);
            store.set(key(2), vec![0; 5]);
            store.set(key(2), vec![0; 40]);
            assert!(log.borrow().is_empty(), "{policy:?}");
            assert_eq!(store.used_bytes(), 45);

            store.set(key(3), vec![0; 1]);
            assert_eq!(log.borrow().len(), 1, "{policy:?}");
            assert_eq!(store.used_bytes(), 41);
        }
    }
}

// ==============================================
// Eviction Listener
// ==============================================

mod listener {
    use super::*;

    #[test]
    fn fires_once_per_removed_entry() {
        for policy in POLICIES {
            let (mut store, log) = logged(policy, 6);
            store.set(key(1), vec![1; 2]);
            store.set(key(2), vec![2; 2]);
            store.set(key(3), vec![3; 2]);
            store.set(key(4), vec![4; 2]); // capacity: k1
            store.del(&key(3));
            store.del_oldest(); // k2
            store.del(&key(99));

            assert_eq!(
                *log.borrow(),
                vec![
                    (key(1), vec![1; 2]),
                    (key(3), vec![3; 2]),
                    (key(2), vec![2; 2]),
                ],
                "{policy:?}"
            );
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn replacement_is_silent() {
        for policy in POLICIES {
            let (mut store, log) = logged(policy, 0);
            store.set(key(1), vec![1]);
            assert_eq!(store.set(key(1), vec![2]), Some(vec![1]));
            assert!(log.borrow().is_empty(), "{policy:?}");
            store.del(&key(1));
            assert_eq!(*log.borrow(), vec![(key(1), vec![2])]);
        }
    }

    struct Tally {
        bytes: Rc<RefCell<usize>>,
    }

    impl EvictionListener<u32, String> for Tally {
        fn on_evict(&mut self, _key: &u32, value: &String) {
            *self.bytes.borrow_mut() += value.len();
        }
    }

    #[test]
    fn trait_listener_through_builder() {
        for policy in POLICIES {
            let bytes = Rc::new(RefCell::new(0));
            let mut store = StoreBuilder::new(0)
                .listener(Tally {
                    bytes: Rc::clone(&bytes),
                })
                .build(policy);
            store.set(1u32, "abc".to_string());
            store.set(2u32, "de".to_string());
            store.del_oldest();
            store.del_oldest();
            assert_eq!(*bytes.borrow(), 5, "{policy:?}");
        }
    }
}

// ==============================================
// Empty Sentinel
// ==============================================

mod sentinel {
    use super::*;

    #[test]
    fn absent_and_empty_values_read_alike() {
        for policy in POLICIES {
            let mut store = StoreBuilder::<&str, String>::new(0).build(policy);
            store.set("blank", String::new());
            assert_eq!(store.get_or_empty(&"blank"), store.get_or_empty(&"missing"));
            assert_eq!(store.get(&"blank"), Some(&String::new()));
            assert_eq!(store.get(&"missing"), None);
        }
    }

    #[test]
    fn present_value_is_cloned_out() {
        let mut store = StoreBuilder::<u8, Vec<u8>>::new(0).build(Policy::lfu());
        store.set(1, vec![7, 7]);
        assert_eq!(store.get_or_empty(&1), vec![7, 7]);
        assert_eq!(store.len(), 1);
    }
}

// ==============================================
// Ordering Per Policy
// ==============================================

mod ordering {
    use super::*;

    #[test]
    fn fifo_update_refreshes_position() {
        let mut store = StoreBuilder::<&str, u8>::new(0).build(Policy::Fifo);
        store.set("a", 1);
        store.set("b", 2);
        store.set("a", 3);
        assert_eq!(store.del_oldest(), Some(("b", 2)));
        assert_eq!(store.del_oldest(), Some(("a", 3)));
    }

    #[test]
    fn fixed_lfu_ignores_reads() {
        let mut store = StoreBuilder::<&str, u8>::new(0).build(Policy::lfu());
        store.set("a", 1);
        store.set("b", 2);
        store.set("c", 3);
        for _ in 0..10 {
            store.get(&"a");
        }
        assert_eq!(store.del_oldest(), Some(("a", 1)));
        assert_eq!(store.del_oldest(), Some(("b", 2)));
    }

    #[test]
    fn counting_lfu_protects_hot_keys() {
        let mut store = StoreBuilder::<&str, u8>::new(0).build(Policy::Lfu(Weighting::CountAccesses));
        store.set("a", 1);
        store.set("b", 2);
        store.set("c", 3);
        for _ in 0..10 {
            store.get(&"a");
        }
        store.get(&"c");
        assert_eq!(store.del_oldest(), Some(("b", 2)));
        assert_eq!(store.del_oldest(), Some(("c", 3)));
        assert_eq!(store.del_oldest(), Some(("a", 1)));
    }

    #[test]
    fn contains_never_reorders() {
        for policy in POLICIES {
            let mut store = StoreBuilder::<&str, u8>::new(0).build(policy);
            store.set("a", 1);
            store.set("b", 2);
            for _ in 0..5 {
                assert!(store.contains(&"a"));
            }
            assert_eq!(store.del_oldest(), Some(("a", 1)), "{policy:?}");
        }
    }
}
