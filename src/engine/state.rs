//! Thread-shared timer state.
//!
//! This module holds the authoritative countdown bookkeeping: the configured
//! target duration, the running flag, the start/pause instants, and the
//! hour/minute/second cells that back both the staged configuration and the
//! live display. Everything is atomic; the state is shared between exactly
//! two threads (the caller-facing thread and the polling worker) and no
//! mutex is used. The single multi-step invariant, expiry detection plus the
//! implicit reset, is collapsed into one compare-and-swap retry loop in
//! [`TimerState::read_remaining_seconds`].

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

use crate::engine::clock::ClockSource;
use crate::types::{HmsValue, Segment};

// ============================================================================
// HmsCells
// ============================================================================

/// Lock-free hour/minute/second cells.
///
/// The same three cells serve two roles: while the timer is inactive they
/// hold the staged configuration being edited, and during a run the polling
/// worker overwrites them with the converted remaining time for display.
#[derive(Debug, Default)]
pub struct HmsCells {
    hour: AtomicU8,
    minute: AtomicU8,
    second: AtomicU8,
}

impl HmsCells {
    /// Reads the current segment value.
    pub fn get(&self, segment: Segment) -> u8 {
        self.cell(segment).load(Ordering::Acquire)
    }

    /// Writes one segment value.
    pub fn set(&self, segment: Segment, value: u8) {
        self.cell(segment).store(value, Ordering::Release);
    }

    /// Snapshots all three cells.
    ///
    /// The three loads are not one atomic unit; a concurrent writer can land
    /// between them. Tick-granularity display tolerates that.
    pub fn load(&self) -> HmsValue {
        HmsValue {
            hour: self.hour.load(Ordering::Acquire),
            minute: self.minute.load(Ordering::Acquire),
            second: self.second.load(Ordering::Acquire),
        }
    }

    /// Overwrites all three cells.
    pub fn store(&self, value: HmsValue) {
        self.hour.store(value.hour, Ordering::Release);
        self.minute.store(value.minute, Ordering::Release);
        self.second.store(value.second, Ordering::Release);
    }

    /// Zeroes all three cells.
    pub fn clear(&self) {
        self.store(HmsValue::default());
    }

    fn cell(&self, segment: Segment) -> &AtomicU8 {
        match segment {
            Segment::Hour => &self.hour,
            Segment::Minute => &self.minute,
            Segment::Second => &self.second,
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Atomic duration/running bookkeeping shared by the caller thread and the
/// polling worker.
///
/// `target_seconds` holds the *originally configured* total for the current
/// run, never a live countdown; zero means "no active run". Remaining time
/// is always derived as `target - elapsed(start)` and never stored.
#[derive(Debug)]
pub struct TimerState {
    clock: ClockSource,
    /// Originally configured total seconds for the current run; 0 when idle
    target_seconds: AtomicU64,
    /// True while actively counting down (false when idle *and* when paused)
    running: AtomicBool,
    /// Run start, in clock millis; shifted forward on resume so paused time
    /// never counts against the remaining duration
    start_millis: AtomicU64,
    /// Instant the current pause began, in clock millis
    pause_millis: AtomicU64,
    hms: HmsCells,
}

impl TimerState {
    /// Creates an idle state (all zero) with its own clock epoch.
    pub fn new() -> Self {
        Self {
            clock: ClockSource::new(),
            target_seconds: AtomicU64::new(0),
            running: AtomicBool::new(false),
            start_millis: AtomicU64::new(0),
            pause_millis: AtomicU64::new(0),
            hms: HmsCells::default(),
        }
    }

    /// Returns the shared hour/minute/second cells.
    pub fn hms(&self) -> &HmsCells {
        &self.hms
    }

    /// Begins a run of `total_seconds`.
    ///
    /// A zero-length run is refused (no state change). The running flag is
    /// stored last so the worker never observes `running == true` before the
    /// target and start instant are in place.
    pub fn start(&self, total_seconds: u64) {
        if total_seconds == 0 {
            tracing::debug!("refusing to start a zero-length run");
            return;
        }
        self.start_millis
            .store(self.clock.now_millis(), Ordering::Release);
        self.target_seconds.store(total_seconds, Ordering::Release);
        self.running.store(true, Ordering::Release);
        tracing::debug!(total_seconds, "run started");
    }

    /// Pauses the countdown. No-op if not running.
    pub fn pause(&self) {
        if !self.running.load(Ordering::Acquire) {
            return;
        }
        self.pause_millis
            .store(self.clock.now_millis(), Ordering::Release);
        self.running.store(false, Ordering::Release);
        tracing::debug!("run paused");
    }

    /// Resumes a paused countdown. No-op if already running.
    ///
    /// The start instant is advanced by the paused interval, so elapsed time
    /// over the whole run equals wall-clock time minus every paused span.
    pub fn resume(&self) {
        if self.running.load(Ordering::Acquire) {
            return;
        }
        let paused_for = self
            .clock
            .now_millis()
            .saturating_sub(self.pause_millis.load(Ordering::Acquire));
        self.start_millis.fetch_add(paused_for, Ordering::AcqRel);
        self.running.store(true, Ordering::Release);
        tracing::debug!(paused_ms = paused_for, "run resumed");
    }

    /// Clears the run and the staged configuration, returning to idle.
    ///
    /// Idempotent; also invoked implicitly by
    /// [`read_remaining_seconds`](Self::read_remaining_seconds) on expiry.
    pub fn reset(&self) {
        self.running.store(false, Ordering::Release);
        self.target_seconds.store(0, Ordering::Release);
        self.start_millis.store(0, Ordering::Release);
        self.pause_millis.store(0, Ordering::Release);
        self.hms.clear();
    }

    /// The lock-free expiry check.
    ///
    /// Computes elapsed whole seconds since the (possibly shifted) start
    /// instant and runs a compare-and-swap retry loop on the target: an
    /// observed target at or below the elapsed time is atomically replaced
    /// with zero, marking expiry. Once any thread wins that exchange it
    /// performs the full [`reset`](Self::reset), so every subsequent read on
    /// either thread observes the idle state.
    ///
    /// **This read is not side-effect-free.** Calling it on an expired (or
    /// already idle) timer resets the engine; see
    /// [`TimerEngine::is_expiring`](crate::engine::TimerEngine::is_expiring),
    /// which inherits the same behavior.
    pub fn read_remaining_seconds(&self) -> u64 {
        loop {
            let elapsed = self.elapsed_seconds();
            let observed = self.target_seconds.load(Ordering::Acquire);
            let next = if observed <= elapsed { 0 } else { observed };
            // Contention is only two-way; this resolves within a few spins.
            if self
                .target_seconds
                .compare_exchange(observed, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                if next == 0 {
                    self.reset();
                    return 0;
                }
                return next - elapsed;
            }
        }
    }

    /// Whole seconds elapsed since the run started, excluding paused spans.
    fn elapsed_seconds(&self) -> u64 {
        let start = self.start_millis.load(Ordering::Acquire);
        ClockSource::whole_seconds(self.clock.now_millis().saturating_sub(start))
    }

    /// True while a run exists, whether counting or paused.
    pub fn is_active(&self) -> bool {
        self.target_seconds.load(Ordering::Acquire) != 0
    }

    /// Raw running flag.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// The originally configured total for the current run (0 when idle).
    pub fn target_seconds(&self) -> u64 {
        self.target_seconds.load(Ordering::Acquire)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
