// src/progress.rs
use crate::data::EventRef;

/// Lightweight progress reporting used by the crawl.
/// Frontends implement this to surface status to users. Calls happen on the
/// crawl's calling thread, in index order, and never change what the crawl does.
pub trait Progress {
    /// Called once the event list is final, with the number of events to fetch.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One event's records were added. `completed` counts up from 1 to `total`.
    fn item_done(&mut self, _completed: usize, _total: usize, _event: &EventRef) {}

    /// One event was skipped after a fetch failure. Counts like `item_done`.
    fn item_failed(&mut self, _completed: usize, _total: usize, _event: &EventRef) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Adapts a plain `(completed, total)` callback.
pub struct FnProgress<F: FnMut(usize, usize)>(pub F);

impl<F: FnMut(usize, usize)> Progress for FnProgress<F> {
    fn item_done(&mut self, completed: usize, total: usize, _event: &EventRef) {
        (self.0)(completed, total);
    }
    fn item_failed(&mut self, completed: usize, total: usize, _event: &EventRef) {
        (self.0)(completed, total);
    }
}

/// Prints one line per event to stderr.
pub struct StderrProgress {
    total: usize,
    failed: usize,
}

impl StderrProgress {
    pub fn new() -> Self {
        Self { total: 0, failed: 0 }
    }
}

impl Default for StderrProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Fetching {total} event(s)…");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, completed: usize, total: usize, event: &EventRef) {
        eprintln!("[{completed}/{total}] {}", event.name);
    }
    fn item_failed(&mut self, completed: usize, total: usize, event: &EventRef) {
        self.failed += 1;
        eprintln!("[{completed}/{total}] {} (failed, skipped)", event.name);
    }
    fn finish(&mut self) {
        if self.failed == 0 {
            eprintln!("Fetch complete ({} events)", self.total);
        } else {
            eprintln!("Fetch complete ({} events, {} skipped)", self.total, self.failed);
        }
    }
}
