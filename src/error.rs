// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Url(#[from] UrlError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(
        "all mirrors failed for {user_id} ({} attempts); last errors: {}",
        .attempts.len(),
        last_errors(.attempts, 3)
    )]
    AllMirrorsFailed { user_id: String, attempts: Vec<Attempt> },

    #[error("no tracked author with id {0}")]
    UnknownAuthor(String),

    #[error("export to {path} failed: {source}")]
    Export { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("not a Google Scholar profile URL: {0}")]
    NotScholarUrl(String),
    #[error("no user= parameter in {0}")]
    MissingUserId(String),
}

/// One failed request against one mirror.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("network unreachable: {0}")]
    Offline(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("access denied, human verification likely required (HTTP 403)")]
    Blocked,
    #[error("profile page not found (HTTP 404)")]
    NotFound,
    #[error("HTTP {0}")]
    Http(u16),
    #[error("anti-automation challenge page")]
    Challenge,
    #[error("page structure changed: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("citation table not found")]
    MissingCitationTable,
    #[error("citation table has {0} cells, expected 6")]
    IncompleteCitationTable(usize),
    #[error("author name not found")]
    MissingName,
    #[error("sign-in required")]
    LoginRequired,
    #[error("paper table not found")]
    MissingPaperTable,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("store key {key} holds invalid JSON: {source}")]
    Json { key: String, source: serde_json::Error },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Record of a failed attempt inside the mirror fallback loop.
#[derive(Debug)]
pub struct Attempt {
    pub host: String,
    pub attempt: u32,
    pub error: FetchError,
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}: {}", self.host, self.attempt, self.error)
    }
}

fn last_errors(attempts: &[Attempt], n: usize) -> String {
    let skip = attempts.len().saturating_sub(n);
    attempts
        .iter()
        .skip(skip)
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
