// src/progress.rs
/// Lightweight progress reporting used by long-running operations (paging, enrichment).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (0 if unknown).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (a page, a species lookup).
    fn item_done(&mut self, _label: &str) {}

    /// Called when one logical unit fails but the operation carries on.
    fn item_failed(&mut self, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
