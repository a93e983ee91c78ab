//! Integration tests for concurrent access patterns
//!
//! Covers:
//! - No lost updates when many threads hit one key
//! - Exactly one aggregate per key under racing first writes
//! - Writes to one key never perturb another key
//! - Readers never see a torn (count, mean) pair
//! - A brand-new key is absent until its first sample is counted
//! - Async callers sharing a coordinator across tokio tasks

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use statline_common::{GameStats, IngestCoordinator, Namespace, Sample, StatsEntry, StatsStore, Store};
use tokio::task::JoinSet;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

#[test]
fn test_no_lost_updates_on_hot_key() {
    let store = Store::new("players");
    let sample = Sample::from([12.0, 4.0, 3.0, 1.0, 0.0, 2.0, 1.0, 28.0]);
    let submitted = AtomicU64::new(0);

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..PER_THREAD {
                    assert!(store.submit("hot", &sample));
                    submitted.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    });

    let snap = store.query("hot").unwrap();
    assert_eq!(snap.count, submitted.load(Ordering::Relaxed));
    assert_eq!(snap.count, (THREADS * PER_THREAD) as u64);
    for (a, e) in snap.mean.to_array().iter().zip(sample.to_array()) {
        assert!((a - e).abs() < 1e-9);
    }
}

#[test]
fn test_racing_first_writes_share_one_aggregate() {
    // Every thread's first write targets the same brand-new key at once
    for round in 0..20 {
        let store = Store::new("players");
        let barrier = Barrier::new(THREADS);
        let key = format!("rookie-{}", round);

        thread::scope(|s| {
            for t in 0..THREADS {
                let (store, barrier, key) = (&store, &barrier, &key);
                s.spawn(move || {
                    barrier.wait();
                    assert!(store.submit(key, &Sample::from([t as f64; 8])));
                });
            }
        });

        let snap = store.query(&key).unwrap();
        assert_eq!(snap.count, THREADS as u64, "round {}: first write lost", round);
        assert_eq!(store.len(), 1);

        // Mean of 0..THREADS
        let expected = (THREADS - 1) as f64 / 2.0;
        assert!((snap.mean.points - expected).abs() < 1e-9);
    }
}

#[test]
fn test_mean_is_exact_under_mixed_values() {
    let store = Store::new("players");

    thread::scope(|s| {
        for t in 0..THREADS {
            let store = &store;
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    let v = (t * PER_THREAD + i) as f64;
                    store.submit("mixed", &Sample::from([v; 8]));
                }
            });
        }
    });

    let n = (THREADS * PER_THREAD) as f64;
    let expected = (n - 1.0) / 2.0;
    let snap = store.query("mixed").unwrap();
    assert_eq!(snap.count, n as u64);
    for value in snap.mean.to_array() {
        assert!((value - expected).abs() < 1e-6, "{} != {}", value, expected);
    }
}

#[test]
fn test_writes_to_other_key_do_not_perturb() {
    let store = Store::new("teams");
    let steady = Sample::from([100.0, 40.0, 25.0, 8.0, 5.0, 20.0, 12.0, 240.0]);
    assert!(store.submit("A", &steady));

    let done = AtomicBool::new(false);
    thread::scope(|s| {
        for t in 0..THREADS {
            let store = &store;
            s.spawn(move || {
                for i in 0..PER_THREAD {
                    store.submit("B", &Sample::from([(t + i) as f64; 8]));
                }
            });
        }
        s.spawn(|| {
            while !done.load(Ordering::Acquire) {
                let a = store.query("A").unwrap();
                assert_eq!(a.count, 1);
                assert_eq!(a.mean, steady);
            }
        });
        // Reader keeps checking while the writers run
        thread::sleep(std::time::Duration::from_millis(50));
        done.store(true, Ordering::Release);
    });

    assert_eq!(store.query("A").unwrap().mean, steady);
    assert_eq!(store.query("B").unwrap().count, (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_readers_never_see_torn_pairs() {
    // A single writer submits 0, 1, 2, ... so after n accepts the mean must be
    // exactly (n - 1) / 2. A count paired with a mean from another update
    // breaks that relation.
    let store = Store::new("players");
    let writes = 5_000u64;
    let stop = AtomicBool::new(false);

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                while !stop.load(Ordering::Acquire) {
                    if let Some(snap) = store.query("P") {
                        let expected = (snap.count - 1) as f64 / 2.0;
                        assert!(
                            (snap.mean.points - expected).abs() < 1e-6,
                            "count {} paired with mean {}",
                            snap.count,
                            snap.mean.points
                        );
                    }
                }
            });
        }

        for k in 0..writes {
            assert!(store.submit("P", &Sample::from([k as f64; 8])));
        }
        stop.store(true, Ordering::Release);
    });

    assert_eq!(store.query("P").unwrap().count, writes);
}

#[test]
fn test_key_invisible_until_first_sample_lands() {
    // Readers chase the key the writer is about to create. Whatever they see
    // must already contain that key's first game.
    let store = Store::new("players");
    let keys = 20_000usize;
    let game = Sample::from([21.0, 9.0, 4.0, 1.0, 1.0, 2.0, 3.0, 31.0]);
    let next = AtomicU64::new(0);
    let stop = AtomicBool::new(false);

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                while !stop.load(Ordering::Acquire) {
                    let i = next.load(Ordering::Acquire);
                    if let Some(snap) = store.query(&format!("rookie-{}", i)) {
                        assert_eq!(snap.count, 1, "key rookie-{} seen before its first game", i);
                        assert_eq!(snap.mean, game);
                    }
                }
            });
        }

        for i in 0..keys {
            assert!(store.submit(&format!("rookie-{}", i), &game));
            next.store(i as u64 + 1, Ordering::Release);
        }
        stop.store(true, Ordering::Release);
    });

    assert_eq!(store.len(), keys);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_batches_from_tasks() {
    let coordinator = Arc::new(IngestCoordinator::in_memory());
    let mut join_set = JoinSet::new();

    for task in 0..10 {
        let coordinator = Arc::clone(&coordinator);
        join_set.spawn(async move {
            let batch: Vec<StatsEntry> = (0..50)
                .map(|i| {
                    StatsEntry::new(
                        format!("player-{}", i % 5),
                        format!("team-{}", task % 2),
                        GameStats {
                            points: 20,
                            rebounds: 10,
                            assists: 5,
                            steals: 2,
                            blocks: 1,
                            fouls: 3,
                            turnovers: 2,
                            minutes_played: 32.0,
                        },
                    )
                })
                .collect();
            coordinator.process_batch(&batch)
        });
    }

    let mut total = 0;
    while let Some(result) = join_set.join_next().await {
        total += result.expect("Task panicked");
    }

    assert_eq!(total, 500);
    for i in 0..5 {
        let snap = coordinator
            .query(Namespace::Player, &format!("player-{}", i))
            .unwrap();
        assert_eq!(snap.count, 100);
        assert_eq!(snap.mean.points, 20.0);
    }
    let team_total: u64 = (0..2)
        .map(|t| {
            coordinator
                .query(Namespace::Team, &format!("team-{}", t))
                .unwrap()
                .count
        })
        .sum();
    assert_eq!(team_total, 500);
}
