// src/core/net.rs
//
// Blocking HTTPS GET with a desktop-browser header set.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, HeaderMap, HeaderName, HeaderValue, PRAGMA, USER_AGENT,
};

use crate::config::consts;
use crate::error::FetchError;

/// The one network seam. Swap in a scripted client for tests.
pub trait HttpClient: Send + Sync {
    /// GET `url` and return the body of a 2xx, non-challenge response.
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

pub struct ReqwestClient {
    inner: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        logd!("GET {url}");
        let resp = self.inner.get(url).send().map_err(classify_transport)?;
        let status = resp.status().as_u16();
        logd!("GET {url} → {status}");
        check_status(status)?;
        let body = resp.text().map_err(classify_transport)?;
        check_challenge(&body)?;
        Ok(body)
    }
}

fn browser_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_static(consts::USER_AGENT));
    h.insert(ACCEPT, HeaderValue::from_static(consts::ACCEPT));
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(consts::ACCEPT_LANGUAGE));
    h.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    h.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    h.insert(HeaderName::from_static("sec-fetch-dest"), HeaderValue::from_static("document"));
    h.insert(HeaderName::from_static("sec-fetch-mode"), HeaderValue::from_static("navigate"));
    h.insert(HeaderName::from_static("sec-fetch-site"), HeaderValue::from_static("none"));
    h
}

fn classify_transport(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Offline(e.to_string())
    } else {
        FetchError::Network(e.to_string())
    }
}

pub fn check_status(status: u16) -> Result<(), FetchError> {
    match status {
        200..=299 => Ok(()),
        429 => Err(FetchError::RateLimited),
        403 => Err(FetchError::Blocked),
        404 => Err(FetchError::NotFound),
        other => Err(FetchError::Http(other)),
    }
}

/// A challenge page mentions a captcha or "unusual traffic" and carries no
/// citation table. Real profiles can reference captcha scripts, so the
/// table check keeps them from tripping this.
pub fn check_challenge(body: &str) -> Result<(), FetchError> {
    if body.contains("gsc_rsb_st") {
        return Ok(());
    }
    let lc = body.to_ascii_lowercase();
    if lc.contains("captcha") || lc.contains("unusual traffic") {
        return Err(FetchError::Challenge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_kinds() {
        assert!(check_status(200).is_ok());
        assert!(matches!(check_status(429), Err(FetchError::RateLimited)));
        assert!(matches!(check_status(403), Err(FetchError::Blocked)));
        assert!(matches!(check_status(404), Err(FetchError::NotFound)));
        assert!(matches!(check_status(502), Err(FetchError::Http(502))));
    }

    #[test]
    fn challenge_detected_without_table() {
        let body = "<html><body>Our systems have detected Unusual Traffic from your network.</body></html>";
        assert!(matches!(check_challenge(body), Err(FetchError::Challenge)));
        assert!(matches!(
            check_challenge("<form id=\"gs_captcha_f\"></form>"),
            Err(FetchError::Challenge)
        ));
    }

    #[test]
    fn profile_with_captcha_script_is_not_a_challenge() {
        let body = r#"<script src="/recaptcha.js"></script><table id="gsc_rsb_st"></table>"#;
        assert!(check_challenge(body).is_ok());
    }

    #[test]
    fn header_set_looks_like_a_browser() {
        let h = browser_headers();
        assert!(h.get(USER_AGENT).unwrap().to_str().unwrap().starts_with("Mozilla/5.0"));
        assert_eq!(h.get("sec-fetch-mode").unwrap(), "navigate");
    }
}
