// src/scrape/fallback.rs
use crate::{
    config::FetchOptions,
    core::HttpClient,
    error::{Attempt, FetchError, ParseError},
};

use super::Sleeper;

/// Preferred mirror first (if it is configured), then the rest in
/// configured order. Each host appears once.
pub fn mirror_order<'a>(mirrors: &'a [String], preferred: Option<&str>) -> Vec<&'a str> {
    let pref = preferred.and_then(|p| mirrors.iter().find(|m| m.as_str() == p));
    let mut out: Vec<&str> = Vec::with_capacity(mirrors.len());
    out.extend(pref.map(String::as_str));
    for m in mirrors {
        if Some(m) != pref && !out.contains(&m.as_str()) {
            out.push(m);
        }
    }
    out
}

/// GET + parse one logical page, walking mirrors until something works.
///
/// - every host gets `opts.attempts_per_mirror()` tries, `retry_delay` apart,
///   whatever the failure (a 429 burst or a truncated page can clear in a second);
/// - `mirror_pause` separates hosts.
///
/// Returns the parsed value and the host that produced it, or every failed
/// attempt in order.
pub fn fetch_with_fallback<T>(
    client: &dyn HttpClient,
    sleeper: &dyn Sleeper,
    opts: &FetchOptions,
    preferred: Option<&str>,
    build_url: impl Fn(&str) -> String,
    parse: impl Fn(&str, &str) -> Result<T, ParseError>,
) -> Result<(T, String), Vec<Attempt>> {
    let order = mirror_order(&opts.mirrors, preferred);
    let mut attempts: Vec<Attempt> = Vec::new();

    for (i, host) in order.iter().enumerate() {
        if i > 0 {
            sleeper.sleep(opts.mirror_pause());
        }
        let origin = format!("https://{host}");

        for n in 1..=opts.attempts_per_mirror() {
            if n > 1 {
                sleeper.sleep(opts.retry_delay());
            }
            let url = build_url(host);
            let result = client
                .get(&url)
                .and_then(|body| parse(&body, &origin).map_err(FetchError::from));

            match result {
                Ok(value) => {
                    if !attempts.is_empty() {
                        logf!("{host} answered after {}", plural!(attempts.len(), "failed attempt"));
                    }
                    return Ok((value, s!(*host)));
                }
                Err(error) => {
                    logw!("{host} attempt {n}: {error}");
                    attempts.push(Attempt { host: s!(*host), attempt: n, error });
                }
            }
        }
    }

    Err(attempts)
}
