// src/specs/profile.rs
//
// Author header + citation table.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::config::consts::UNKNOWN_AFFILIATION;
use crate::core::html::{Page, captures_all, selector, strip_tags, text_of};
use crate::core::sanitize::{normalize_ws, parse_count, strip_bidi};
use crate::data::{Metrics, Profile};
use crate::error::ParseError;

static NAME: LazyLock<Selector> = LazyLock::new(|| selector("#gsc_prf_in"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static AFFILIATION: LazyLock<Selector> = LazyLock::new(|| selector("#gsc_prf_i .gsc_prf_il"));
static INTERESTS: LazyLock<Selector> = LazyLock::new(|| selector("#gsc_prf_int a"));
static META_DESC: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[name="description"]"#));
static STATS_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("#gsc_rsb_st"));
static STATS_CELLS: LazyLock<Selector> = LazyLock::new(|| selector("#gsc_rsb_st td.gsc_rsb_std"));

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table[^>]*id="gsc_rsb_st"[^>]*>.*?</table>"#)
        .unwrap_or_else(|e| panic!("citation table regex: {e}"))
});
static CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<td[^>]*class="gsc_rsb_std"[^>]*>(.*?)</td>"#)
        .unwrap_or_else(|e| panic!("citation cell regex: {e}"))
});

const TITLE_SUFFIX: &str = " - Google Scholar";

/// Citations / h-index / i10-index, all-time and recent.
///
/// Cells are read in document order; fewer than six through the DOM falls
/// back to a regex over the raw table before giving up.
pub fn parse_metrics(page: &Page<'_>) -> Result<Metrics, ParseError> {
    let dom_cells = page.texts(&STATS_CELLS);
    let cells = if dom_cells.len() >= 6 {
        dom_cells
    } else {
        let re_cells = cells_by_regex(page.raw);
        if re_cells.len() >= 6 {
            logd!("Metrics: DOM gave {} cells, regex fallback gave {}", dom_cells.len(), re_cells.len());
            re_cells
        } else if !page.has(&STATS_TABLE) && !TABLE_RE.is_match(page.raw) {
            return Err(ParseError::MissingCitationTable);
        } else {
            return Err(ParseError::IncompleteCitationTable(dom_cells.len().max(re_cells.len())));
        }
    };

    let mut n = [0u32; 6];
    for (slot, cell) in n.iter_mut().zip(&cells) {
        *slot = parse_count(cell).unwrap_or(0);
    }
    Ok(Metrics::from_cells(n))
}

fn cells_by_regex(raw: &str) -> Vec<String> {
    let Some(table) = TABLE_RE.find(raw) else { return Vec::new() };
    captures_all(&CELL_RE, table.as_str())
        .into_iter()
        .map(strip_tags)
        .collect()
}

/// Name, affiliation and interests. Only the name is mandatory.
pub fn parse_profile(page: &Page<'_>) -> Result<Profile, ParseError> {
    let name = page
        .first(&NAME)
        .map(text_of)
        .filter(|n| !n.is_empty())
        .or_else(|| name_from_title(page))
        .ok_or_else(|| {
            if looks_like_sign_in(page.raw) { ParseError::LoginRequired } else { ParseError::MissingName }
        })?;

    let meta = meta_segments(page);

    let affiliation = page
        .first(&AFFILIATION)
        .map(text_of)
        .filter(|a| !a.is_empty() && !a.starts_with("Verified email"))
        .or_else(|| meta.first().filter(|s| !s.starts_with("Cited by")).cloned())
        .unwrap_or_else(|| s!(UNKNOWN_AFFILIATION));

    let mut interests: Vec<String> = page.texts(&INTERESTS).into_iter().filter(|i| !i.is_empty()).collect();
    if interests.is_empty() {
        if let Some(cited) = meta.iter().position(|s| s.starts_with("Cited by")) {
            interests = meta[cited + 1..].to_vec();
        }
    }

    Ok(Profile { name, affiliation, interests })
}

/// `Ada Lovelace - Google Scholar` → `Ada Lovelace`, bidi marks dropped
fn name_from_title(page: &Page<'_>) -> Option<String> {
    let title = page.first(&TITLE).map(text_of)?;
    let name = title.split(TITLE_SUFFIX).next().unwrap_or("").trim();
    if name.is_empty() || name == "Google Scholar" { None } else { Some(s!(name)) }
}

fn looks_like_sign_in(raw: &str) -> bool {
    raw.contains("accounts.google.com/ServiceLogin") || raw.contains("Sign in")
}

/// `"Affiliation - Cited by N - Interest - Interest"` split on ` - `.
fn meta_segments(page: &Page<'_>) -> Vec<String> {
    page.first(&META_DESC)
        .and_then(|m| m.value().attr("content"))
        .map(|c| {
            strip_bidi(c)
                .split(" - ")
                .map(normalize_ws)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
