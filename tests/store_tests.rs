// SPDX-License-Identifier: MIT

//! Roster store tests: flat-file persistence and split merge semantics.

use split_tracker::models::{Checkpoint, Runner, RunnerSnapshot, Split};
use split_tracker::store::RosterStore;

fn runner(bib: &str) -> Runner {
    let now = chrono::Utc::now().to_rfc3339();
    Runner {
        bib_number: bib.to_string(),
        name: format!("Runner {}", bib),
        password: "1234".to_string(),
        group_id: None,
        splits: Vec::new(),
        current_distance_km: 0.0,
        current_pace: None,
        estimated_finish_time: None,
        suspect: false,
        created_at: now.clone(),
        updated_at: now,
    }
}

fn split(distance_km: f64, cumulative_seconds: f64) -> Split {
    Split {
        checkpoint: Checkpoint {
            code: format!("{}K", distance_km),
            label: format!("{}km", distance_km),
            distance_km,
            time_seconds: cumulative_seconds,
        },
        split_seconds: 0.0,
        cumulative_seconds,
        pace_seconds_per_km: None,
    }
}

fn snapshot(splits: Vec<Split>) -> RunnerSnapshot {
    let distance = splits
        .iter()
        .map(|s| s.checkpoint.distance_km)
        .fold(0.0, f64::max);
    RunnerSnapshot {
        name: None,
        current_distance_km: distance,
        current_pace: Some(300.0),
        estimated_finish_time: Some("03:30:00".to_string()),
        suspect: false,
        splits,
    }
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runners.json");

    {
        let store = RosterStore::open(&path).unwrap();
        store.insert(runner("101")).unwrap();
        store.insert(runner("202")).unwrap();
    }

    let reopened = RosterStore::open(&path).unwrap();
    assert_eq!(reopened.list().len(), 2);
    let loaded = reopened.get("101").unwrap();
    assert_eq!(loaded.name, "Runner 101");
    // The delete secret must survive persistence
    assert_eq!(loaded.password, "1234");
}

#[test]
fn test_concurrent_merges_keep_roster_file_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runners.json");
    let store = RosterStore::open(&path).unwrap();
    for i in 0..8 {
        store.insert(runner(&format!("10{}", i))).unwrap();
    }

    // One refresh task per runner, all persisting to the same file
    std::thread::scope(|s| {
        for i in 0..8 {
            let store = &store;
            s.spawn(move || {
                let bib = format!("10{}", i);
                for km in [5.0, 10.0, 15.0] {
                    store
                        .merge_snapshot(&bib, &snapshot(vec![split(km, km * 300.0)]))
                        .unwrap();
                }
            });
        }
    });

    let reopened = RosterStore::open(&path).unwrap();
    assert_eq!(reopened.list().len(), 8);
    assert_eq!(reopened.get("103").unwrap().splits.len(), 3);
}

#[test]
fn test_duplicate_bib_rejected() {
    let store = RosterStore::in_memory();
    store.insert(runner("101")).unwrap();
    assert!(store.insert(runner("101")).is_err());
}

#[test]
fn test_delete_missing_runner_is_not_found() {
    let store = RosterStore::in_memory();
    assert!(store.delete("999").is_err());
}

#[test]
fn test_merge_suppresses_duplicate_distances() {
    let store = RosterStore::in_memory();
    store.insert(runner("7")).unwrap();

    store
        .merge_snapshot("7", &snapshot(vec![split(5.0, 1500.0)]))
        .unwrap();
    // Second fetch re-delivers the 5 km split with a different time
    store
        .merge_snapshot(
            "7",
            &snapshot(vec![split(5.0, 1501.0), split(10.0, 3030.0)]),
        )
        .unwrap();

    let merged = store.get("7").unwrap();
    assert_eq!(merged.splits.len(), 2);
    // First write wins for a given distance
    assert_eq!(merged.splits[0].cumulative_seconds, 1500.0);
    assert_eq!(merged.splits[1].checkpoint.distance_km, 10.0);
}

#[test]
fn test_merge_keeps_splits_ordered_by_distance() {
    let store = RosterStore::in_memory();
    store.insert(runner("7")).unwrap();

    store
        .merge_snapshot("7", &snapshot(vec![split(10.0, 3030.0)]))
        .unwrap();
    store
        .merge_snapshot("7", &snapshot(vec![split(5.0, 1500.0)]))
        .unwrap();

    let merged = store.get("7").unwrap();
    let distances: Vec<f64> = merged
        .splits
        .iter()
        .map(|s| s.checkpoint.distance_km)
        .collect();
    assert_eq!(distances, vec![5.0, 10.0]);
}

#[test]
fn test_empty_snapshot_leaves_runner_untouched() {
    let store = RosterStore::in_memory();
    let mut r = runner("7");
    r.current_distance_km = 5.0;
    store.insert(r).unwrap();

    store
        .merge_snapshot("7", &RunnerSnapshot::default())
        .unwrap();

    assert_eq!(store.get("7").unwrap().current_distance_km, 5.0);
}

#[test]
fn test_suspect_flag_is_sticky() {
    let store = RosterStore::in_memory();
    store.insert(runner("7")).unwrap();

    let mut bad = snapshot(vec![split(5.0, 1500.0)]);
    bad.suspect = true;
    store.merge_snapshot("7", &bad).unwrap();

    let clean = snapshot(vec![split(10.0, 3030.0)]);
    store.merge_snapshot("7", &clean).unwrap();

    assert!(store.get("7").unwrap().suspect);
}
