// src/export.rs
//! Flat tables for CSV/TSV export and clipboard copy.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{
    config::ExportOptions,
    core::sanitize::title_key,
    csv::rows_to_string,
    data::Author,
    error::{Error, Result},
    file::write_file,
};

pub const AUTHOR_HEADERS: [&str; 15] = [
    "User ID", "Name", "Affiliation", "Citations", "Change", "h-index", "i10-index",
    "Citations (recent)", "h-index (recent)", "i10-index (recent)", "Papers", "Mirror",
    "Last updated", "Last error", "URL",
];

pub const PAPER_HEADERS: [&str; 7] = ["Title", "Year", "Citations", "Change", "Authors", "Venue", "Link"];

/// Headers + rows, ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn render(&self, opts: &ExportOptions) -> String {
        let headers = opts.include_headers.then_some(self.headers.as_slice());
        rows_to_string(headers, &self.rows, opts.format.delim())
    }

    /// Render and write to `path`. Returns the path for reporting.
    pub fn write(&self, path: &Path, opts: &ExportOptions) -> Result<PathBuf> {
        write_file(path, &self.render(opts))
            .map_err(|source| Error::Export { path: path.to_path_buf(), source })?;
        logf!("Exported {} to {}", plural!(self.rows.len(), "row"), path.display());
        Ok(path.to_path_buf())
    }
}

fn signed(d: i64) -> String {
    if d > 0 { format!("+{d}") } else if d < 0 { d.to_string() } else { s!() }
}

fn timestamp(t: Option<DateTime<Utc>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()
}

/// One row per author. `Change` is only filled while the NEW marker is live.
pub fn authors_table(authors: &[Author], now: DateTime<Utc>) -> Table {
    let rows = authors
        .iter()
        .map(|a| {
            let m = &a.metrics;
            let change = if a.is_new(now) { signed(a.citation_delta()) } else { s!() };
            vec![
                a.user_id.clone(),
                a.name.clone(),
                a.affiliation.clone(),
                m.total_citations.to_string(),
                change,
                m.h_index.to_string(),
                m.i10_index.to_string(),
                m.recent_citations.to_string(),
                m.recent_h_index.to_string(),
                m.recent_i10_index.to_string(),
                a.papers.len().to_string(),
                a.working_domain.clone().unwrap_or_default(),
                timestamp(a.last_updated),
                a.last_error.clone().unwrap_or_default(),
                a.url.clone(),
            ]
        })
        .collect();
    Table { headers: AUTHOR_HEADERS.iter().map(|h| s!(*h)).collect(), rows }
}

/// One row per paper in profile order, with the last recorded delta.
pub fn papers_table(author: &Author) -> Table {
    let rows = author
        .papers
        .iter()
        .map(|p| {
            let key = title_key(&p.title);
            let change = author
                .paper_changes
                .iter()
                .find(|c| title_key(&c.title) == key)
                .map(|c| signed(c.delta()))
                .unwrap_or_default();
            vec![
                p.title.clone(),
                p.year.map(|y| y.to_string()).unwrap_or_default(),
                p.citations.to_string(),
                change,
                p.authors.clone(),
                p.venue.clone(),
                p.link.clone().unwrap_or_default(),
            ]
        })
        .collect();
    Table { headers: PAPER_HEADERS.iter().map(|h| s!(*h)).collect(), rows }
}
