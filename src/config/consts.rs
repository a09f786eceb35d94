// src/config/consts.rs

// Net config
pub const MIRRORS: &[&str] = &[
    "scholar.google.com",
    "scholar.google.com.hk",
    "scholar.google.com.sg",
    "scholar.google.co.jp",
    "scholar.google.co.uk",
    "scholar.google.com.tw",
    "scholar.google.de",
    "scholar.google.fr",
    "scholar.google.ca",
    "scholar.google.cn",
];
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Retry / pacing (be polite)
pub const RETRIES_PER_MIRROR: u32 = 2;
pub const RETRY_DELAY_MS: u64 = 1_000;
pub const MIRROR_PAUSE_MS: u64 = 500;
pub const AUTHOR_PAUSE_MS: u64 = 2_000;
pub const PAGE_PAUSE_MS: u64 = 1_000;

// Pagination
pub const PAGE_SIZE: u32 = 100;
pub const MAX_PAGES: u32 = 20;

// Schedule
pub const REFRESH_INTERVAL_SECS: u64 = 30 * 60;
pub const INITIAL_DELAY_SECS: u64 = 5;
pub const CHANGE_WINDOW_HOURS: i64 = 24;

// Local store
pub const STORE_DIR: &str = ".store";
pub const CONFIG_FILE: &str = "scholar_watch.toml";
pub const AUTHORS_KEY: &str = "authors";
pub const LAST_UPDATE_KEY: &str = "last_update_time";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_AUTHORS_FILE: &str = "authors";

// Placeholders when the page leaves a field out
pub const UNKNOWN_AFFILIATION: &str = "Unknown affiliation";
