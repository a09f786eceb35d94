// tests/common/mod.rs
//
// Offline doubles for the network, the clock and the sleeper, plus a
// profile page builder that matches the live markup closely enough for the
// parsers.
#![allow(dead_code)]

use std::{
    path::Path,
    sync::{Arc, Mutex},
    time::Duration,
};

use chrono::{DateTime, TimeZone, Utc};
use scholar_watch::{
    clock::Clock,
    config::FetchOptions,
    core::HttpClient,
    error::FetchError,
    scrape::Sleeper,
    store::Store,
    tracker::Tracker,
};

pub type Handler = dyn Fn(&str) -> Result<String, FetchError> + Send + Sync;

/// Answers every GET through a closure and logs the URLs.
pub struct FnClient {
    handler: Box<Handler>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FnClient {
    pub fn new(handler: impl Fn(&str) -> Result<String, FetchError> + Send + Sync + 'static) -> Self {
        Self { handler: Box::new(handler), calls: Arc::new(Mutex::new(Vec::new())) }
    }
}

impl HttpClient for FnClient {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        (self.handler)(url)
    }
}

pub struct NoSleep;
impl Sleeper for NoSleep {
    fn sleep(&self, _d: Duration) {}
}

#[derive(Clone)]
pub struct TestClock(pub Arc<Mutex<DateTime<Utc>>>);

impl TestClock {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(t0())))
    }
    pub fn advance_hours(&self, h: i64) {
        *self.0.lock().unwrap() += chrono::Duration::hours(h);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

pub fn host_of(url: &str) -> &str {
    url.trim_start_matches("https://").split('/').next().unwrap()
}

pub fn cstart_of(url: &str) -> u32 {
    url.split("cstart=").nth(1).and_then(|r| r.split('&').next()).and_then(|n| n.parse().ok()).unwrap_or(0)
}

pub fn tracker(dir: &Path, client: FnClient, clock: &TestClock) -> Tracker {
    let store = Store::open(dir.join("store")).unwrap();
    let opts = FetchOptions { retries: 2, ..FetchOptions::without_delays() };
    Tracker::new(store, opts, Box::new(client))
        .with_sleeper(Box::new(NoSleep))
        .with_clock(Box::new(clock.clone()))
}

pub fn papers(list: &[(&str, u32)]) -> Vec<(String, u32)> {
    list.iter().map(|(t, c)| (t.to_string(), *c)).collect()
}

/// A profile page. `more` leaves the "Show more" button enabled.
pub fn profile_html(name: &str, total: u32, papers: &[(String, u32)], more: bool) -> String {
    let mut rows = String::new();
    for (i, (title, cites)) in papers.iter().enumerate() {
        rows.push_str(&format!(
            r#"<tr class="gsc_a_tr"><td class="gsc_a_t"><a href="/citations?view_op=view_citation&amp;hl=en&amp;citation_for_view=x:{i}" class="gsc_a_at">{title}</a><div class="gs_gray">A Author</div><div class="gs_gray">Journal {i}</div></td><td class="gsc_a_c"><a class="gsc_a_ac gs_ibl">{cites}</a></td><td class="gsc_a_y"><span class="gsc_a_h">2020</span></td></tr>"#
        ));
    }
    let disabled = if more { "" } else { r#" disabled="""# };
    format!(
        r#"<html><head><title>{name} - Google Scholar</title></head><body>
<div id="gsc_prf_i"><div id="gsc_prf_in">{name}</div><div class="gsc_prf_il">Test University</div>
<div class="gsc_prf_il" id="gsc_prf_int"><a class="gsc_prf_inta">Testing</a></div></div>
<table id="gsc_rsb_st"><tbody>
<tr><td>Citations</td><td class="gsc_rsb_std">{total}</td><td class="gsc_rsb_std">1</td></tr>
<tr><td>h-index</td><td class="gsc_rsb_std">3</td><td class="gsc_rsb_std">1</td></tr>
<tr><td>i10-index</td><td class="gsc_rsb_std">2</td><td class="gsc_rsb_std">0</td></tr>
</tbody></table>
<table id="gsc_a_t"><tbody id="gsc_a_b">{rows}</tbody></table>
<button id="gsc_bpf_more"{disabled}><span>Show more</span></button>
</body></html>"#
    )
}
