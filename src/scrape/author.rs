// src/scrape/author.rs
use crate::{
    config::FetchOptions,
    core::HttpClient,
    data::FetchedAuthor,
    error::{Attempt, Error, Result},
    profile_url::ProfileUrl,
    specs::{self, ProfilePage},
};

use super::{Sleeper, fetch_with_fallback};

/// Profile + metrics + the full paper list.
///
/// Page 0 goes through the mirror fallback starting at `preferred`; later
/// pages start at whichever mirror served the previous one. Any page that
/// exhausts every mirror fails the whole fetch, so a partial paper list is
/// never returned.
pub fn fetch_author(
    client: &dyn HttpClient,
    sleeper: &dyn Sleeper,
    opts: &FetchOptions,
    url: &ProfileUrl,
    preferred: Option<&str>,
) -> Result<FetchedAuthor> {
    let user_id = url.user_id();
    let page_size = opts.page_size.max(1);
    let failed = |attempts: Vec<Attempt>| Error::AllMirrorsFailed { user_id: s!(user_id), attempts };

    let (first, mut working) = fetch_with_fallback(
        client,
        sleeper,
        opts,
        preferred,
        |host| url.page(host, 0, page_size),
        |body, origin| specs::parse_profile_page(body, origin, page_size),
    )
    .map_err(failed)?;

    let ProfilePage { profile, metrics, mut papers, mut more } = first;
    let mut pages: u32 = 1;

    while more && pages < opts.max_pages {
        let Some(cstart) = page_start(pages, page_size) else {
            logw!("{user_id}: cstart overflows at page {}, stopping", pages + 1);
            break;
        };
        sleeper.sleep(opts.page_pause());
        let (next, host) = fetch_with_fallback(
            client,
            sleeper,
            opts,
            Some(working.as_str()),
            |h| url.page(h, cstart, page_size),
            |body, origin| specs::parse_papers_page(body, origin, page_size),
        )
        .map_err(failed)?;

        logd!("{user_id}: page {} (cstart={cstart}) → {} rows", pages + 1, next.papers.len());
        pages += 1;
        working = host;
        if next.papers.is_empty() {
            break;
        }
        papers.extend(next.papers);
        more = next.more;
    }

    if more && pages >= opts.max_pages {
        logw!("{user_id}: stopped at {} ({} papers so far)", plural!(pages, "page"), papers.len());
    }
    logf!("{user_id}: {} via {working}, {} citations", plural!(papers.len(), "paper"), metrics.total_citations);

    Ok(FetchedAuthor {
        user_id: s!(user_id),
        url: url.canonical(&working),
        working_domain: working,
        profile,
        metrics,
        papers,
    })
}

/// `cstart` of the zero-based page `index`; `None` once it no longer fits.
fn page_start(index: u32, page_size: u32) -> Option<u32> {
    index.checked_mul(page_size)
}
