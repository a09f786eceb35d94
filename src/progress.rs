// src/progress.rs
/// Lightweight progress reporting used by long-running operations (refresh/export).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one author was fetched and merged.
    fn item_done(&mut self, _name: &str) {}

    /// Called when one author could not be fetched; its snapshot is kept.
    fn item_failed(&mut self, _name: &str, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
