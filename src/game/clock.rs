use std::time::{Duration, Instant};

/// Monotonic elapsed-time capture for a session
///
/// Started when the board or quiz is initialized and read once on completion.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    started_at: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Whole seconds since start, rounded down
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }
}
