//! Request generation tracking
//!
//! Every search is tagged with the generation issued when it started. Only
//! the most recent generation may update the results; anything older has
//! been superseded and is dropped when it completes.

/// Monotonic generation counter for in-flight searches
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the generation for a new request, superseding all earlier ones
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Supersede every in-flight request without starting a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
