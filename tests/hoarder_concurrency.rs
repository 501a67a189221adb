// ==============================================
// HOARDER CONCURRENCY TESTS (integration)
// ==============================================
//
// Races between registration, merging, lookup and iteration. These need
// multi-threaded execution and cannot live inline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use hoardkit::prelude::*;

// ==============================================
// Opposite-direction merges
// ==============================================
//
// Two registries merging into each other at the same time must not
// deadlock, and both must end up holding every key.

mod cross_merge {
    use super::*;

    #[test]
    fn opposite_merges_complete() {
        for _ in 0..200 {
            let left = Hoarder::build(loot![Thing::new(1u8), use_inventory("shared")]);
            let right = Hoarder::build(loot![Thing::new(2u16), use_inventory("shared")]);
            let barrier = Arc::new(Barrier::new(2));

            let (l, r, b) = (left.clone(), right.clone(), barrier.clone());
            let t_a = thread::spawn(move || {
                b.wait();
                l.merge(&r);
            });
            let (l, r, b) = (left.clone(), right.clone(), barrier.clone());
            let t_b = thread::spawn(move || {
                b.wait();
                r.merge(&l);
            });

            t_a.join().unwrap();
            t_b.join().unwrap();

            let left_keys = left.inventory(DEFAULT_INVENTORY).unwrap().keys();
            assert!(left_keys.contains(&"u16".to_string()));
            assert!(right.try_equip::<u16>(&EquipOptions::new()).is_ok());
            #[cfg(debug_assertions)]
            {
                left.check_invariants().unwrap();
                right.check_invariants().unwrap();
            }
        }
    }

    #[test]
    fn opposite_inventory_merges_complete() {
        for _ in 0..200 {
            let a = use_inventory("a");
            a.put(remember_as(Thing::new(1u8), "x"));
            let b = use_inventory("b");
            b.put(remember_as(Thing::new(2u8), "y"));
            let barrier = Arc::new(Barrier::new(2));

            let (a1, b1, g1) = (a.clone(), b.clone(), barrier.clone());
            let t_a = thread::spawn(move || {
                g1.wait();
                a1.merge(&b1);
            });
            let (a2, b2, g2) = (a.clone(), b.clone(), barrier.clone());
            let t_b = thread::spawn(move || {
                g2.wait();
                b2.merge(&a2);
            });

            t_a.join().unwrap();
            t_b.join().unwrap();

            assert!(a.contains_key("u8\ny"));
            assert!(b.contains_key("u8\nx"));
            #[cfg(debug_assertions)]
            {
                a.check_invariants().unwrap();
                b.check_invariants().unwrap();
            }
        }
    }
}

// ==============================================
// Readers during writes
// ==============================================

mod readers {
    use super::*;

    #[derive(Debug)]
    struct Config(usize);

    #[test]
    fn lookups_never_observe_torn_state() {
        let hoarder = Hoarder::build(loot![Thing::new(Config(0))]);
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let hoarder = hoarder.clone();
            let done = done.clone();
            thread::spawn(move || {
                for i in 1..=500 {
                    let fresh = Hoarder::build(loot![Thing::new(Config(i))]);
                    hoarder.merge(&fresh);
                }
                done.store(true, Ordering::Release);
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let hoarder = hoarder.clone();
                let done = done.clone();
                thread::spawn(move || {
                    let mut last = 0;
                    while !done.load(Ordering::Acquire) {
                        let seen = hoarder.equip::<Config>(&EquipOptions::new()).0;
                        assert!(seen >= last, "value went backwards: {seen} < {last}");
                        last = seen;
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(hoarder.equip::<Config>(&EquipOptions::new()).0, 500);
    }

    #[test]
    fn loadout_blocks_writers_until_dropped() {
        let inventory = use_inventory("walk");
        for i in 0..4u32 {
            inventory.put(remember_as(Thing::new(i), &i.to_string()));
        }

        let started = Arc::new(Barrier::new(2));
        let wrote = Arc::new(AtomicBool::new(false));

        let mut walk = inventory.loadout();
        assert!(walk.next().is_some());

        let writer = {
            let inventory = inventory.clone();
            let started = started.clone();
            let wrote = wrote.clone();
            thread::spawn(move || {
                started.wait();
                inventory.put(remember_as(Thing::new(99u32), "late"));
                wrote.store(true, Ordering::Release);
            })
        };

        started.wait();
        thread::sleep(std::time::Duration::from_millis(20));
        assert!(!wrote.load(Ordering::Acquire));
        assert_eq!(walk.by_ref().count(), 3);
        drop(walk);

        writer.join().unwrap();
        assert!(wrote.load(Ordering::Acquire));
        assert_eq!(inventory.len(), 5);
    }
}

// ==============================================
// Global registration from many threads
// ==============================================

mod global_races {
    use super::*;

    #[derive(Debug)]
    struct Worker(usize);

    #[test]
    fn concurrent_hoards_keep_every_named_value() {
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    hoard(
                        &HoardOptions::new(),
                        loot![remember_as(Thing::new(Worker(i)), &format!("worker-{i}"))],
                    );
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..threads {
            let options = EquipOptions::new().with_custom_item_name(format!("worker-{i}"));
            assert_eq!(equip::<Worker>(&options, None).0, i);
        }
        assert!(try_equip::<Worker>(&EquipOptions::new(), None).is_ok());
    }
}
