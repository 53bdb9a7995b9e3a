#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::IntrusiveList;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Tests random sequences of push_front, pop_back, move_to_front, remove and
// clear, checking structural invariants after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let value = u32::from(pair[1]);
        match pair[0] % 6 {
            0 => {
                let id = list.push_front(value).expect("arena growth");
                all_ids.push(id);
                assert_eq!(list.front_id(), Some(id));
                assert_eq!(list.get(id), Some(&value));
            }
            1 => {
                let old_len = list.len();
                match list.pop_back() {
                    Some((id, _)) => {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                    None => assert_eq!(old_len, 0),
                }
            }
            2 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    if list.move_to_front(id) {
                        assert_eq!(list.front_id(), Some(id));
                    } else {
                        assert!(!list.contains(id) || list.front_id() == Some(id));
                    }
                }
            }
            3 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    let was_live = list.contains(id);
                    assert_eq!(list.remove(id).is_some(), was_live);
                    assert!(!list.contains(id));
                }
            }
            4 => {
                let collected: Vec<u32> = list.iter().copied().collect();
                assert_eq!(collected.len(), list.len());
            }
            _ => {
                list.clear();
                assert!(list.is_empty());
                assert_eq!(list.front_id(), None);
            }
        }

        list.check_invariants().expect("list invariants");
    }
});
