// src/clock.rs
use chrono::{DateTime, Utc};

/// Wall clock seam; the change window and timestamps all read through it.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
