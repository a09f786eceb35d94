// src/schedule.rs
use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{Duration, Instant},
};

use crate::{config::ScheduleOptions, error::Result, notify::Notifier, tracker::{RefreshReport, Tracker}};

/// Granularity of the stop check while waiting.
const SLICE: Duration = Duration::from_millis(200);

/// Refresh after `initial_delay`, then every `interval`, until `stop` is set.
///
/// `on_cycle` sees every run's outcome; the loop itself never gives up on
/// an error, the next cycle just tries again.
pub fn watch(
    tracker: &Tracker,
    opts: &ScheduleOptions,
    notifier: &dyn Notifier,
    stop: &AtomicBool,
    mut on_cycle: impl FnMut(&Result<RefreshReport>),
) {
    logf!("Watching: first refresh in {}s, then every {}s", opts.initial_delay_secs, opts.interval_secs);
    if !wait(opts.initial_delay(), stop) {
        return;
    }
    loop {
        let r = tracker.refresh_all(None, notifier);
        match &r {
            Ok(report) => logf!(
                "Auto-refresh: {}/{} ok, {}",
                report.refreshed,
                report.total(),
                plural!(report.citation_changes.len(), "change")
            ),
            Err(e) => loge!("Auto-refresh failed: {e}"),
        }
        on_cycle(&r);
        if !wait(opts.interval(), stop) {
            break;
        }
    }
    logd!("Watch loop stopped");
}

/// Sleep `d` in slices. False if `stop` was raised before or during.
fn wait(d: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now() + d;
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(SLICE.min(deadline - now));
    }
}
