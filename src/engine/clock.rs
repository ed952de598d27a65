//! Wall-clock time accounting for the timer engine.
//!
//! All timestamp bookkeeping in the engine is stored as whole milliseconds
//! since a per-engine epoch so that instants can live in atomics and be
//! shared across threads without locking.

use std::time::Instant;

// ============================================================================
// ClockSource
// ============================================================================

/// Monotonic clock with a fixed epoch.
///
/// Captured once at engine construction; every timestamp the engine stores is
/// an offset from this epoch, measured in milliseconds.
#[derive(Debug, Clone)]
pub struct ClockSource {
    epoch: Instant,
}

impl ClockSource {
    /// Creates a clock whose epoch is the current instant.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    /// Returns milliseconds elapsed since the epoch.
    pub fn now_millis(&self) -> u64 {
        // Over 584 million years of uptime would be needed to overflow u64.
        self.epoch.elapsed().as_millis() as u64
    }

    /// Converts a millisecond span into whole elapsed seconds.
    pub fn whole_seconds(millis: u64) -> u64 {
        millis / 1000
    }
}

impl Default for ClockSource {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
