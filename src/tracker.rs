// src/tracker.rs
//! Tracked-author operations over the store.
//!
//! Two locks:
//! - `run_lock` serializes network runs (add / refresh), so the watch loop and
//!   a button press never fetch the same author twice at once;
//! - `store_lock` guards each load → modify → save of the `authors` key.
//!
//! Fetching happens outside `store_lock`, so `remove_author` and `mark_read`
//! stay instant during a long refresh. Results are merged into a fresh load,
//! which means an author removed mid-refresh stays removed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::{
    clock::{Clock, SystemClock},
    config::{AppOptions, FetchOptions},
    core::{HttpClient, ReqwestClient},
    data::{Author, AuthorDelta, FetchedAuthor},
    diff::{CitationChange, PaperChange},
    error::{Error, Result},
    notify::{Notification, Notifier, build_notification},
    profile_url::ProfileUrl,
    progress::Progress,
    scrape::{self, Sleeper, ThreadSleeper},
    store::Store,
};

pub struct Tracker {
    store: Store,
    opts: FetchOptions,
    client: Box<dyn HttpClient>,
    sleeper: Box<dyn Sleeper>,
    clock: Box<dyn Clock>,
    run_lock: Mutex<()>,
    store_lock: Mutex<()>,
}

/// Result of [`Tracker::add_author`].
#[derive(Clone, Debug)]
pub struct Added {
    pub author: Author,
    /// The author was already tracked and got refreshed instead.
    pub existed: bool,
    pub citation: Option<CitationChange>,
}

/// Outcome of one [`Tracker::refresh_all`] run.
#[derive(Clone, Debug, Default)]
pub struct RefreshReport {
    pub refreshed: usize,
    /// `(name, error)` per author whose fetch failed.
    pub failed: Vec<(String, String)>,
    pub citation_changes: Vec<CitationChange>,
    pub paper_changes: Vec<PaperChange>,
    pub notification: Option<Notification>,
}

impl RefreshReport {
    pub fn total(&self) -> usize {
        self.refreshed + self.failed.len()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub authors: usize,
    pub total_citations: u64,
    /// Authors currently showing a NEW marker.
    pub with_changes: usize,
}

fn guard(m: &Mutex<()>) -> MutexGuard<'_, ()> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Tracker {
    pub fn new(store: Store, opts: FetchOptions, client: Box<dyn HttpClient>) -> Self {
        Self {
            store,
            opts,
            client,
            sleeper: Box::new(ThreadSleeper),
            clock: Box::new(SystemClock),
            run_lock: Mutex::new(()),
            store_lock: Mutex::new(()),
        }
    }

    /// Real network, real clock, store under `opts.store_dir`.
    pub fn from_options(opts: &AppOptions) -> Result<Self> {
        let store = Store::open(&opts.store_dir)?;
        let client = ReqwestClient::new(opts.fetch.timeout())?;
        Ok(Self::new(store, opts.fetch.clone(), Box::new(client)))
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn options(&self) -> &FetchOptions {
        &self.opts
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn fetch(&self, url: &ProfileUrl, preferred: Option<&str>) -> Result<FetchedAuthor> {
        scrape::fetch_author(self.client.as_ref(), self.sleeper.as_ref(), &self.opts, url, preferred)
    }

    /// Load → mutate → save under the store lock.
    fn update_authors<R>(&self, f: impl FnOnce(&mut Vec<Author>, DateTime<Utc>) -> Result<R>) -> Result<R> {
        let _g = guard(&self.store_lock);
        let now = self.now();
        let mut authors = self.store.load_authors(now)?;
        let out = f(&mut authors, now)?;
        self.store.save_authors(&authors)?;
        Ok(out)
    }

    /* ---------------- Queries ---------------- */

    pub fn authors(&self) -> Result<Vec<Author>> {
        let _g = guard(&self.store_lock);
        Ok(self.store.load_authors(self.now())?)
    }

    pub fn author(&self, user_id: &str) -> Result<Author> {
        self.authors()?
            .into_iter()
            .find(|a| a.user_id == user_id)
            .ok_or_else(|| Error::UnknownAuthor(s!(user_id)))
    }

    pub fn summary(&self) -> Result<Summary> {
        let now = self.now();
        let authors = self.authors()?;
        Ok(Summary {
            authors: authors.len(),
            total_citations: authors.iter().map(|a| u64::from(a.metrics.total_citations)).sum(),
            with_changes: authors.iter().filter(|a| a.is_new(now)).count(),
        })
    }

    pub fn last_update_time(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.store.last_update_time()?)
    }

    /* ---------------- Mutations ---------------- */

    /// Validate, fetch the full profile, upsert by user id.
    pub fn add_author(&self, input: &str) -> Result<Added> {
        let url = ProfileUrl::parse(input, self.opts.mirrors.as_slice())?;
        let _run = guard(&self.run_lock);

        let preferred = self
            .authors()?
            .into_iter()
            .find(|a| a.user_id == url.user_id())
            .and_then(|a| a.working_domain);
        let fetched = self.fetch(&url, preferred.as_deref())?;

        let added = self.update_authors(|authors, now| {
            let added = match authors.iter_mut().find(|a| a.user_id == fetched.user_id) {
                Some(existing) => {
                    let delta = existing.apply_fetch(fetched, now);
                    Added { author: existing.clone(), existed: true, citation: delta.citation }
                }
                None => {
                    let author = Author::from_fetch(fetched, now);
                    authors.push(author.clone());
                    Added { author, existed: false, citation: None }
                }
            };
            Ok(added)
        })?;
        self.store.set_last_update_time(self.now())?;

        logf!(
            "{} {} ({}), {} citations",
            if added.existed { "Updated" } else { "Added" },
            added.author.name,
            added.author.user_id,
            added.author.metrics.total_citations
        );
        Ok(added)
    }

    pub fn remove_author(&self, user_id: &str) -> Result<Author> {
        self.update_authors(|authors, _| {
            let idx = authors
                .iter()
                .position(|a| a.user_id == user_id)
                .ok_or_else(|| Error::UnknownAuthor(s!(user_id)))?;
            Ok(authors.remove(idx))
        })
        .inspect(|a| logf!("Removed {} ({})", a.name, a.user_id))
    }

    pub fn mark_read(&self, user_id: &str) -> Result<()> {
        self.update_authors(|authors, _| {
            let a = authors
                .iter_mut()
                .find(|a| a.user_id == user_id)
                .ok_or_else(|| Error::UnknownAuthor(s!(user_id)))?;
            a.mark_read();
            Ok(())
        })
    }

    /// Clear every NEW marker at once.
    pub fn mark_all_read(&self) -> Result<usize> {
        self.update_authors(|authors, now| {
            let n = authors.iter().filter(|a| a.is_new(now)).count();
            authors.iter_mut().for_each(Author::mark_read);
            Ok(n)
        })
    }

    /// Refresh every tracked author in stored order, one at a time.
    ///
    /// A failed author keeps its snapshot and only records the attempt.
    /// Everything is persisted once at the end, then `notifier` hears about
    /// any increase.
    pub fn refresh_all(&self, mut progress: Option<&mut dyn Progress>, notifier: &dyn Notifier) -> Result<RefreshReport> {
        let _run = guard(&self.run_lock);
        let targets = self.authors()?;
        let mut report = RefreshReport::default();

        if targets.is_empty() {
            if let Some(p) = progress.as_deref_mut() {
                p.log("No authors tracked.");
                p.finish();
            }
            return Ok(report);
        }

        if let Some(p) = progress.as_deref_mut() {
            p.begin(targets.len());
        }

        let mut results: Vec<(String, Result<FetchedAuthor>)> = Vec::with_capacity(targets.len());
        for (i, a) in targets.iter().enumerate() {
            if i > 0 {
                self.sleeper.sleep(self.opts.author_pause());
            }
            let url = ProfileUrl::from_user_id(a.user_id.as_str());
            let r = self.fetch(&url, a.working_domain.as_deref());
            if let Some(p) = progress.as_deref_mut() {
                match &r {
                    Ok(_) => p.item_done(&a.name),
                    Err(e) => p.item_failed(&a.name, &e.to_string()),
                }
            }
            results.push((a.user_id.clone(), r));
        }

        self.update_authors(|authors, now| {
            for (user_id, r) in results {
                let Some(a) = authors.iter_mut().find(|a| a.user_id == user_id) else {
                    logd!("{user_id}: removed during refresh, result dropped");
                    continue;
                };
                match r {
                    Ok(fetched) => {
                        let AuthorDelta { citation, papers } = a.apply_fetch(fetched, now);
                        report.refreshed += 1;
                        report.citation_changes.extend(citation);
                        report.paper_changes.extend(papers);
                    }
                    Err(e) => {
                        loge!("{} ({}): {e}", a.name, a.user_id);
                        a.record_failure(&e.to_string(), now);
                        report.failed.push((a.name.clone(), e.to_string()));
                    }
                }
            }
            Ok(())
        })?;
        self.store.set_last_update_time(self.now())?;

        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!(
                "Refreshed {}/{}, {}.",
                report.refreshed,
                report.total(),
                plural!(report.citation_changes.len(), "change")
            ));
            p.finish();
        }

        report.notification = build_notification(&report.citation_changes, &report.paper_changes);
        if let Some(n) = &report.notification {
            notifier.notify(n);
        }
        Ok(report)
    }

    /// Same merge as [`refresh_all`](Self::refresh_all) for a single author.
    /// A fetch failure is recorded on the snapshot and returned.
    pub fn refresh_one(&self, user_id: &str, notifier: &dyn Notifier) -> Result<AuthorDelta> {
        let _run = guard(&self.run_lock);
        let current = self.author(user_id)?;
        let url = ProfileUrl::from_user_id(user_id);

        match self.fetch(&url, current.working_domain.as_deref()) {
            Ok(fetched) => {
                let delta = self.update_authors(|authors, now| {
                    let a = authors
                        .iter_mut()
                        .find(|a| a.user_id == user_id)
                        .ok_or_else(|| Error::UnknownAuthor(s!(user_id)))?;
                    Ok(a.apply_fetch(fetched, now))
                })?;
                self.store.set_last_update_time(self.now())?;
                let citations: Vec<CitationChange> = delta.citation.iter().cloned().collect();
                if let Some(n) = build_notification(&citations, &delta.papers) {
                    notifier.notify(&n);
                }
                Ok(delta)
            }
            Err(e) => {
                loge!("{} ({}): {e}", current.name, user_id);
                let msg = e.to_string();
                self.update_authors(|authors, now| {
                    if let Some(a) = authors.iter_mut().find(|a| a.user_id == user_id) {
                        a.record_failure(&msg, now);
                    }
                    Ok(())
                })?;
                Err(e)
            }
        }
    }
}
