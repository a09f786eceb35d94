// src/specs/mod.rs
//! # Page specs
//!
//! Pure HTML extraction for Scholar profile pages: *where the numbers live*
//! and *how to read them when the markup shifts*. No network, no storage.
//!
//! - `profile` – name, affiliation, interests, and the six-cell citation
//!   table (`#gsc_rsb_st`). DOM first, regex fallback on the raw text.
//! - `papers` – `tr.gsc_a_tr` rows and the `#gsc_bpf_more` pagination signal.
//!
//! A profile page is read once per fetch; both specs share the parsed DOM
//! through [`Page`].
//!
//! ```text
//! scrape::fetch_author → HttpClient::get → specs::parse_*_page
//!                                        ↘ ProfilePage / PapersPage
//! ```
//!
//! Specs are tested offline against `tests/fixtures/*.html`.
pub mod papers;
pub mod profile;

use crate::core::html::Page;
use crate::data::{Metrics, Paper, Profile};
use crate::error::ParseError;

/// First page of a profile: header, metrics, first batch of papers.
#[derive(Clone, Debug)]
pub struct ProfilePage {
    pub profile: Profile,
    pub metrics: Metrics,
    pub papers: Vec<Paper>,
    pub more: bool,
}

/// Any later page: papers only.
#[derive(Clone, Debug)]
pub struct PapersPage {
    pub papers: Vec<Paper>,
    pub more: bool,
}

pub fn parse_profile_page(raw: &str, origin: &str, page_size: u32) -> Result<ProfilePage, ParseError> {
    let page = Page::parse(raw);
    // Sign-in pages carry no citation table; the name check reports them.
    let profile = profile::parse_profile(&page)?;
    let metrics = profile::parse_metrics(&page)?;
    let papers = papers::parse_papers(&page, origin);
    let more = papers::has_more_pages(&page, papers.len(), page_size);
    Ok(ProfilePage { profile, metrics, papers, more })
}

pub fn parse_papers_page(raw: &str, origin: &str, page_size: u32) -> Result<PapersPage, ParseError> {
    let page = Page::parse(raw);
    if !papers::has_paper_table(&page) {
        return Err(ParseError::MissingPaperTable);
    }
    let papers = papers::parse_papers(&page, origin);
    let more = papers::has_more_pages(&page, papers.len(), page_size);
    Ok(PapersPage { papers, more })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_page_is_login_required_not_missing_table() {
        let html = r#"<html><head><title>Google Scholar</title></head><body>
<a href="https://accounts.google.com/ServiceLogin?continue=x">Sign in</a></body></html>"#;
        let e = parse_profile_page(html, "https://scholar.google.com", 100).unwrap_err();
        assert_eq!(e, ParseError::LoginRequired);
    }

    #[test]
    fn profile_without_table_is_missing_table() {
        let html = r#"<html><body><div id="gsc_prf_in">Ada</div></body></html>"#;
        let e = parse_profile_page(html, "https://scholar.google.com", 100).unwrap_err();
        assert_eq!(e, ParseError::MissingCitationTable);
    }
}
