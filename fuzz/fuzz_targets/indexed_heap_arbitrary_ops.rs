#![no_main]

use bytecache::ds::IndexedHeap;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on IndexedHeap
//
// Tests random sequences of push, pop, remove, set_priority and fix against
// heap order and slot back-references.
fuzz_target!(|data: &[u8]| {
    let mut heap: IndexedHeap<u32, u16> = IndexedHeap::new();
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let arg = pair[1];

        match op {
            0 => {
                let priority = u16::from(arg);
                let id = heap.push(u32::from(arg), priority);
                ids.push(id);
                assert_eq!(heap.priority(id), Some(&priority));
            },
            1 => {
                let min = heap.peek().map(|(id, _)| id);
                let popped = heap.pop();
                assert_eq!(popped.is_some(), min.is_some());
                if let Some(id) = min {
                    ids.retain(|&other| other != id);
                }
            },
            2 => {
                if !ids.is_empty() {
                    let id = ids.swap_remove(usize::from(arg) % ids.len());
                    assert!(heap.remove(id).is_some());
                    assert!(!heap.contains(id));
                }
            },
            3 => {
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    assert!(heap.set_priority(id, u16::from(arg).wrapping_mul(7)));
                }
            },
            _ => {
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    assert!(heap.fix(id));
                }
            },
        }

        assert!(heap.check_invariants().is_ok());
        assert_eq!(heap.len(), ids.len());
    }
});
