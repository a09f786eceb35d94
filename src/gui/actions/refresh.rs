// src/gui/actions/refresh.rs
//
// Network work runs on a worker thread; the UI learns the outcome via Msg::Finished.

use std::{sync::Arc, thread};

use crate::{
    error::Result,
    gui::{
        app::{App, Msg},
        progress::{BannerNotifier, GuiProgress},
    },
    profile_url::ProfileUrl,
    tracker::Tracker,
};

fn spawn<F>(app: &mut App, label: &str, job: F)
where
    F: FnOnce(&Tracker, &mut GuiProgress, &BannerNotifier) -> Result<String> + Send + 'static,
{
    if app.running {
        app.set_status("Busy, wait for the current run to finish");
        return;
    }
    app.running = true;
    app.set_status(label);

    let tracker = Arc::clone(&app.tracker);
    let tx = app.tx.clone();
    let ctx = app.ctx.clone();
    let mut progress = GuiProgress::new(app.status.clone(), app.ctx.clone());
    let notifier = app.notifier();

    thread::spawn(move || {
        let r = job(&tracker, &mut progress, &notifier).map_err(|e| e.to_string());
        let _ = tx.send(Msg::Finished(r));
        ctx.request_repaint();
    });
}

pub fn add(app: &mut App) {
    let input = app.state.gui.url_input.trim().to_string();
    if input.is_empty() {
        app.set_status("Paste a Google Scholar profile URL first");
        return;
    }
    // Validate on the UI thread so bad input never costs a request.
    if let Err(e) = ProfileUrl::parse(&input, app.tracker.options().mirrors.as_slice()) {
        logd!("Add: rejected {input:?}: {e}");
        app.set_status(e.to_string());
        return;
    }
    logf!("Add: {input}");
    app.state.gui.url_input.clear();

    spawn(app, "Fetching profile…", move |tracker, _, _| {
        let added = tracker.add_author(&input)?;
        let verb = if added.existed { "Updated" } else { "Added" };
        Ok(format!(
            "{verb} {} ({} citations, {})",
            added.author.name,
            added.author.metrics.total_citations,
            plural!(added.author.papers.len(), "paper")
        ))
    });
}

pub fn refresh_all(app: &mut App) {
    logf!("Refresh: all");
    spawn(app, "Refreshing…", |tracker, progress, notifier| {
        let report = tracker.refresh_all(Some(progress), notifier)?;
        let mut text = format!("Refreshed {}/{}", report.refreshed, report.total());
        if !report.citation_changes.is_empty() {
            text.push_str(&format!(", {}", plural!(report.citation_changes.len(), "change")));
        }
        if !report.failed.is_empty() {
            text.push_str(&format!(", {} failed", report.failed.len()));
        }
        Ok(text)
    });
}

pub fn refresh_one(app: &mut App, user_id: String) {
    logf!("Refresh: {user_id}");
    spawn(app, "Refreshing author…", move |tracker, _, notifier| {
        let delta = tracker.refresh_one(&user_id, notifier)?;
        Ok(match delta.citation {
            Some(c) => format!("{}: {} → {} ({:+})", c.name, c.old, c.new, c.delta()),
            None => format!("{user_id}: no change"),
        })
    });
}
