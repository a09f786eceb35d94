// src/data.rs
//
// Snapshot records. Serialized wholesale into the store under one key.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::consts::{CHANGE_WINDOW_HOURS, UNKNOWN_AFFILIATION};
use crate::diff::{self, CitationChange, PaperChange};

/// Citation table of a profile: all-time column and the "since YEAR" column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_citations: u32,
    pub h_index: u32,
    pub i10_index: u32,
    pub recent_citations: u32,
    pub recent_h_index: u32,
    pub recent_i10_index: u32,
}

impl Metrics {
    /// Cells in document order: Citations(all, recent), h(all, recent), i10(all, recent).
    pub fn from_cells(c: [u32; 6]) -> Self {
        Self {
            total_citations: c[0],
            recent_citations: c[1],
            h_index: c[2],
            recent_h_index: c[3],
            i10_index: c[4],
            recent_i10_index: c[5],
        }
    }

    pub fn triple(&self) -> (u32, u32, u32) {
        (self.total_citations, self.h_index, self.i10_index)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub year: Option<u16>,
    pub citations: u32,
    pub link: Option<String>,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub venue: String,
}

/// Header block of a profile page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub affiliation: String,
    pub interests: Vec<String>,
}

impl Profile {
    pub fn has_affiliation(&self) -> bool {
        !self.affiliation.is_empty() && self.affiliation != UNKNOWN_AFFILIATION
    }
}

/// Everything one successful fetch produced.
#[derive(Clone, Debug)]
pub struct FetchedAuthor {
    pub user_id: String,
    pub url: String,
    pub working_domain: String,
    pub profile: Profile,
    pub metrics: Metrics,
    pub papers: Vec<Paper>,
}

/// "New citations" marker shown until read or until it ages out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeState {
    pub has_new_citations: bool,
    pub previous_citations: Option<u32>,
    pub change_timestamp: Option<DateTime<Utc>>,
}

impl ChangeState {
    pub fn record(&mut self, previous: u32, now: DateTime<Utc>) {
        self.has_new_citations = true;
        self.previous_citations = Some(previous);
        self.change_timestamp = Some(now);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_recent(&self, now: DateTime<Utc>) -> bool {
        match self.change_timestamp {
            Some(ts) => now - ts < Duration::hours(CHANGE_WINDOW_HOURS),
            None => false,
        }
    }

    /// Shown as NEW: flagged and inside the window.
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        self.has_new_citations && self.is_recent(now)
    }

    /// Clears a change older than the window. Returns true if anything was cleared.
    pub fn expire_if_stale(&mut self, now: DateTime<Utc>) -> bool {
        let stale = !self.is_recent(now);
        let set = self.has_new_citations || self.previous_citations.is_some() || self.change_timestamp.is_some();
        if stale && set {
            self.clear();
            true
        } else {
            false
        }
    }
}

/// Stored snapshot of one tracked author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub user_id: String,
    pub name: String,
    pub affiliation: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub url: String,
    pub working_domain: Option<String>,
    pub metrics: Metrics,
    #[serde(default)]
    pub papers: Vec<Paper>,
    #[serde(default)]
    pub change: ChangeState,
    /// Paper-level deltas behind the current change marker.
    #[serde(default)]
    pub paper_changes: Vec<PaperChange>,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_attempted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_error: Option<String>,
}

/// What changed for one author on one successful fetch.
#[derive(Clone, Debug, Default)]
pub struct AuthorDelta {
    pub citation: Option<CitationChange>,
    pub papers: Vec<PaperChange>,
}

impl Author {
    pub fn from_fetch(f: FetchedAuthor, now: DateTime<Utc>) -> Self {
        Self {
            user_id: f.user_id,
            name: f.profile.name,
            affiliation: f.profile.affiliation,
            interests: f.profile.interests,
            url: f.url,
            working_domain: Some(f.working_domain),
            metrics: f.metrics,
            papers: f.papers,
            change: ChangeState::default(),
            paper_changes: Vec::new(),
            last_updated: Some(now),
            last_attempted: Some(now),
            last_error: None,
        }
    }

    /// Merge a fresh fetch into this snapshot and report what moved.
    ///
    /// Name, affiliation and interests only overwrite when the fresh page
    /// actually had them; metrics and papers always take the fresh values.
    pub fn apply_fetch(&mut self, f: FetchedAuthor, now: DateTime<Utc>) -> AuthorDelta {
        let FetchedAuthor { url, working_domain, profile, metrics, papers, .. } = f;

        let name = if profile.name.is_empty() { &self.name } else { &profile.name };
        let citation = diff::diff_metrics(&self.user_id, name, &self.metrics, &metrics);
        let paper_deltas = diff::diff_papers(&self.papers, &papers);

        if let Some(c) = &citation {
            self.change.record(c.old, now);
            self.paper_changes = paper_deltas.clone();
        } else if self.change.expire_if_stale(now) {
            self.paper_changes.clear();
        }
        if citation.is_none() && !paper_deltas.is_empty() {
            // Same total, shuffled counts (merged entries); keep the newest detail.
            self.paper_changes = paper_deltas.clone();
        }

        let replace_affiliation = profile.has_affiliation() || self.affiliation.is_empty();
        let Profile { name, affiliation, interests } = profile;
        if !name.is_empty() {
            self.name = name;
        }
        if replace_affiliation {
            self.affiliation = affiliation;
        }
        if !interests.is_empty() {
            self.interests = interests;
        }
        self.metrics = metrics;
        self.papers = papers;
        self.url = url;
        self.working_domain = Some(working_domain);
        self.last_updated = Some(now);
        self.last_attempted = Some(now);
        self.last_error = None;

        AuthorDelta { citation, papers: paper_deltas }
    }

    /// Failed refresh: the snapshot stays, only the attempt is recorded.
    pub fn record_failure(&mut self, error: &str, now: DateTime<Utc>) {
        self.last_attempted = Some(now);
        self.last_error = Some(s!(error));
    }

    pub fn mark_read(&mut self) {
        self.change.clear();
        self.paper_changes.clear();
    }

    /// Called on every load from the store.
    pub fn expire_stale_change(&mut self, now: DateTime<Utc>) {
        if self.change.expire_if_stale(now) {
            self.paper_changes.clear();
        }
    }

    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        self.change.is_new(now)
    }

    /// Positive when citations rose since the marker was set.
    pub fn citation_delta(&self) -> i64 {
        self.change
            .previous_citations
            .map_or(0, |prev| i64::from(self.metrics.total_citations) - i64::from(prev))
    }
}
