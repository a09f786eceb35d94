// tests/store_roundtrip.rs
//
// Snapshots persist across Tracker instances and age out on load.

mod common;

use std::{
    fs,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};

use chrono::Duration;
use common::*;
use scholar_watch::{
    clock::Clock,
    data::{Author, ChangeState, Metrics},
    notify::RecordingNotifier,
    store::Store,
};

fn author(id: &str, total: u32) -> Author {
    Author {
        user_id: id.to_string(),
        name: format!("Author {id}"),
        affiliation: "Somewhere".to_string(),
        interests: vec![],
        url: format!("https://scholar.google.com/citations?user={id}&hl=en"),
        working_domain: Some("scholar.google.com".to_string()),
        metrics: Metrics { total_citations: total, ..Metrics::default() },
        papers: vec![],
        change: ChangeState::default(),
        paper_changes: vec![],
        last_updated: Some(t0()),
        last_attempted: Some(t0()),
        last_error: None,
    }
}

#[test]
fn snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::new();
    let client = FnClient::new(|_| Ok(profile_html("Ada Lovelace", 9, &papers(&[("Alpha", 9)]), false)));
    tracker(dir.path(), client, &clock)
        .add_author("https://scholar.google.com/citations?user=u1")
        .unwrap();

    let store = Store::open(dir.path().join("store")).unwrap();
    let authors = store.load_authors(t0()).unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Ada Lovelace");
    assert_eq!(authors[0].papers[0].title, "Alpha");
    assert_eq!(store.last_update_time().unwrap(), Some(t0()));
    assert!(dir.path().join("store").join("authors.json").is_file());
}

#[test]
fn stale_marker_is_cleared_on_load_but_not_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();

    let mut fresh = author("a", 12);
    fresh.change.record(10, t0());
    let mut stale = author("b", 30);
    stale.change.record(20, t0() - Duration::hours(30));
    store.save_authors(&[fresh, stale]).unwrap();

    let loaded = store.load_authors(t0() + Duration::hours(1)).unwrap();
    assert!(loaded[0].change.has_new_citations);
    assert_eq!(loaded[0].citation_delta(), 2);
    assert_eq!(loaded[1].change, ChangeState::default());

    let raw: Vec<Author> = store.get("authors").unwrap().unwrap();
    assert!(raw[1].change.has_new_citations);
}

#[test]
fn corrupt_file_is_reported_not_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    fs::write(dir.path().join("authors.json"), "{ not json").unwrap();

    let err = store.load_authors(t0()).unwrap_err();
    assert!(err.to_string().contains("authors"));
    assert_eq!(fs::read_to_string(dir.path().join("authors.json")).unwrap(), "{ not json");
}

#[test]
fn marker_written_by_refresh_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::new();
    let total = Arc::new(AtomicU32::new(5));
    let t = Arc::clone(&total);
    let client = FnClient::new(move |_| {
        let n = t.load(Ordering::Relaxed);
        Ok(profile_html("Ada Lovelace", n, &papers(&[("Alpha", n)]), false))
    });
    let tr = tracker(dir.path(), client, &clock);
    tr.add_author("https://scholar.google.com/citations?user=u1").unwrap();
    total.store(8, Ordering::Relaxed);
    clock.advance_hours(1);
    tr.refresh_all(None, &RecordingNotifier::default()).unwrap();

    let a = &Store::open(dir.path().join("store")).unwrap().load_authors(clock.now()).unwrap()[0];
    assert_eq!(a.change.previous_citations, Some(5));
    assert_eq!(a.change.change_timestamp, Some(t0() + Duration::hours(1)));
    assert_eq!(a.paper_changes.len(), 1);
    assert_eq!(a.paper_changes[0].delta(), 3);
}
