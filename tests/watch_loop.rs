// tests/watch_loop.rs

mod common;

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU32, Ordering},
};

use common::*;
use scholar_watch::{config::ScheduleOptions, notify::RecordingNotifier, schedule};

#[test]
fn runs_cycles_until_stopped_and_notifies_on_growth() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::new();
    let total = Arc::new(AtomicU32::new(10));
    let t = Arc::clone(&total);
    let client = FnClient::new(move |_| {
        let n = t.fetch_add(1, Ordering::Relaxed);
        Ok(profile_html("Ada Lovelace", n, &papers(&[("Alpha", n)]), false))
    });
    let tracker = tracker(dir.path(), client, &clock);
    tracker.add_author("https://scholar.google.com/citations?user=u1").unwrap();

    let opts = ScheduleOptions { interval_secs: 0, initial_delay_secs: 0 };
    let notifier = RecordingNotifier::default();
    let stop = AtomicBool::new(false);
    let mut cycles = 0;

    schedule::watch(&tracker, &opts, &notifier, &stop, |r| {
        assert!(r.is_ok());
        cycles += 1;
        if cycles == 2 {
            stop.store(true, Ordering::Relaxed);
        }
    });

    assert_eq!(cycles, 2);
    let sent = notifier.take();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].message.lines().next(), Some("Ada Lovelace: 11 → 12 (+1)"));
    assert_eq!(tracker.author("u1").unwrap().metrics.total_citations, 12);
}

#[test]
fn stop_before_first_cycle_skips_refresh() {
    let dir = tempfile::tempdir().unwrap();
    let clock = TestClock::new();
    let client = FnClient::new(|_| Ok(profile_html("Ada Lovelace", 1, &[], false)));
    let calls = Arc::clone(&client.calls);
    let tracker = tracker(dir.path(), client, &clock);

    let stop = AtomicBool::new(true);
    let mut cycles = 0;
    schedule::watch(&tracker, &ScheduleOptions::default(), &RecordingNotifier::default(), &stop, |_| cycles += 1);

    assert_eq!(cycles, 0);
    assert!(calls.lock().unwrap().is_empty());
}
