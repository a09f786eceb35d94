// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;

/// Everything the library needs at runtime. Deserializes from the TOML
/// config file; any field left out keeps its default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub store_dir: PathBuf,
    pub fetch: FetchOptions,
    pub schedule: ScheduleOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(STORE_DIR),
            fetch: FetchOptions::default(),
            schedule: ScheduleOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Tried in order after the author's last working mirror.
    pub mirrors: Vec<String>,
    /// Attempts per mirror before moving on.
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub mirror_pause_ms: u64,
    pub author_pause_ms: u64,
    pub page_pause_ms: u64,
    pub page_size: u32,
    pub max_pages: u32,
    pub timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            mirrors: MIRRORS.iter().map(|m| s!(*m)).collect(),
            retries: RETRIES_PER_MIRROR,
            retry_delay_ms: RETRY_DELAY_MS,
            mirror_pause_ms: MIRROR_PAUSE_MS,
            author_pause_ms: AUTHOR_PAUSE_MS,
            page_pause_ms: PAGE_PAUSE_MS,
            page_size: PAGE_SIZE,
            max_pages: MAX_PAGES,
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl FetchOptions {
    /// No pauses at all. Tests and fixtures only.
    pub fn without_delays() -> Self {
        Self {
            retry_delay_ms: 0,
            mirror_pause_ms: 0,
            author_pause_ms: 0,
            page_pause_ms: 0,
            ..Self::default()
        }
    }

    pub fn retry_delay(&self) -> Duration { Duration::from_millis(self.retry_delay_ms) }
    pub fn mirror_pause(&self) -> Duration { Duration::from_millis(self.mirror_pause_ms) }
    pub fn author_pause(&self) -> Duration { Duration::from_millis(self.author_pause_ms) }
    pub fn page_pause(&self) -> Duration { Duration::from_millis(self.page_pause_ms) }
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    /// Always at least one attempt per mirror, whatever the config says.
    pub fn attempts_per_mirror(&self) -> u32 { self.retries.max(1) }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    pub interval_secs: u64,
    pub initial_delay_secs: u64,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            interval_secs: REFRESH_INTERVAL_SECS,
            initial_delay_secs: INITIAL_DELAY_SECS,
        }
    }
}

impl ScheduleOptions {
    pub fn interval(&self) -> Duration { Duration::from_secs(self.interval_secs) }
    pub fn initial_delay(&self) -> Duration { Duration::from_secs(self.initial_delay_secs) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl ExportOptions {
    /// Default file for a table when the user gave no explicit path.
    pub fn default_path(&self, stem: &str) -> PathBuf {
        self.out_dir.join(format!("{stem}.{}", self.format.ext()))
    }
}
