#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::SlotArena;

// Fuzz arbitrary operation sequences on SlotArena
//
// Stale ids (removed, or removed and then reused) must never resolve.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut live = Vec::new();
    let mut dead = Vec::new();

    for pair in data.chunks_exact(2) {
        let value = u32::from(pair[1]);
        match pair[0] % 5 {
            0 => {
                let id = arena.try_insert(value).expect("arena growth");
                assert_eq!(arena.get(id), Some(&value));
                live.push(id);
            }
            1 => {
                if !live.is_empty() {
                    let id = live.swap_remove(value as usize % live.len());
                    assert!(arena.remove(id).is_some());
                    assert!(arena.remove(id).is_none());
                    dead.push(id);
                }
            }
            2 => {
                if !live.is_empty() {
                    let id = live[value as usize % live.len()];
                    if let Some(slot) = arena.get_mut(id) {
                        *slot = value;
                    }
                    assert_eq!(arena.get(id), Some(&value));
                }
            }
            3 => {
                arena.clear();
                dead.append(&mut live);
                assert!(arena.is_empty());
            }
            _ => {
                let _ = arena.reserve(value as usize);
            }
        }

        assert_eq!(arena.len(), live.len());
        for id in &dead {
            if !live.contains(id) {
                assert!(!arena.contains(*id));
            }
        }
    }
});
