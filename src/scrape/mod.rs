// src/scrape/mod.rs
mod author;
mod fallback;

use std::{thread, time::Duration};

pub use author::fetch_author;
pub use fallback::{fetch_with_fallback, mirror_order};

/// Every pause in the fetch path goes through here so tests can run without
/// waiting and still observe how long the real thing would have slept.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, d: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, d: Duration) {
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}
