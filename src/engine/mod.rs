//! Countdown timer engine.
//!
//! This module composes the timer core:
//! - [`ClockSource`]: wall-clock accounting primitive
//! - [`TimerState`]: atomic duration/running/instant bookkeeping
//! - [`DurationEditor`]: staged hour/minute/second editing
//! - [`PollingWorker`]: background reconciliation loop
//! - [`TimerEngine`]: the facade consumed by front-ends
//!
//! Exactly two threads touch an engine instance: the caller's thread and one
//! dedicated polling thread. All shared state is atomic; the only multi-step
//! invariant (expiry detection plus the implicit reset) lives in a single
//! compare-and-swap retry loop, so no mutex is involved anywhere.

pub mod clock;
pub mod editor;
pub mod error;
pub mod state;
pub mod worker;

use std::sync::Arc;
use std::time::Duration;

pub use clock::ClockSource;
pub use editor::DurationEditor;
pub use error::EngineError;
pub use state::{HmsCells, TimerState};
pub use worker::PollingWorker;

use crate::types::{AdjustDirection, HmsValue, Segment, TimerConfig};

/// A run counts as "expiring" during its final 10 seconds.
pub const EXPIRING_WINDOW_SECS: u64 = 10;

// ============================================================================
// EngineShared
// ============================================================================

/// Zero-argument notification callback fired after every state change.
///
/// Runs on whichever thread triggered the change (caller thread for direct
/// operations, worker thread for periodic ticks), so it must not block or do
/// expensive work.
pub type UpdateCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// State shared between the engine handle and its polling worker.
pub struct EngineShared {
    state: TimerState,
    editor: DurationEditor,
    config: TimerConfig,
    on_update: UpdateCallback,
}

impl EngineShared {
    /// Creates shared state from a validated configuration and callback.
    pub fn new(config: TimerConfig, on_update: UpdateCallback) -> Self {
        Self {
            state: TimerState::new(),
            editor: DurationEditor::new(config.max_hours),
            config,
            on_update,
        }
    }

    /// The atomic timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// The staged-duration editor.
    pub fn editor(&self) -> &DurationEditor {
        &self.editor
    }

    /// The engine configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Fires the update notification.
    pub fn notify(&self) {
        (self.on_update)();
    }
}

impl std::fmt::Debug for EngineShared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineShared")
            .field("state", &self.state)
            .field("editor", &self.editor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Handle to one countdown timer instance.
///
/// Created through [`TimerEngine::spawn`]; the state it shares with the
/// polling worker is reference-counted, and dropping the handle signals the
/// worker, joins it, and only then releases the shared state. Each handle
/// owns an independent engine and worker thread.
#[derive(Debug)]
pub struct TimerEngine {
    // Declared before `shared` so the worker is joined before the handle's
    // reference to the shared state is released.
    worker: PollingWorker,
    shared: Arc<EngineShared>,
}

impl TimerEngine {
    /// Validates `config`, spawns the polling worker, and returns the engine
    /// handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the worker thread
    /// cannot be spawned.
    pub fn spawn<F>(config: TimerConfig, on_update: F) -> Result<Self, EngineError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        config.validate().map_err(EngineError::InvalidConfig)?;
        let tick = Duration::from_millis(config.tick_interval_ms);
        let shared = Arc::new(EngineShared::new(config, Box::new(on_update)));
        let worker = PollingWorker::spawn(Arc::clone(&shared), tick)?;
        Ok(Self { worker, shared })
    }

    /// Spawns an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn spawn_default<F>(on_update: F) -> Result<Self, EngineError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::spawn(TimerConfig::default(), on_update)
    }

    /// Start/pause/resume three-way dispatch.
    ///
    /// Running → pause; idle → start from the staged duration; paused →
    /// resume. Toggling while idle with a zero staged duration does nothing
    /// (and fires no notification).
    pub fn toggle(&self) {
        let state = self.shared.state();
        if state.is_running() {
            state.pause();
        } else if !state.is_active() {
            let total = self.shared.editor().to_total_seconds(state.hms());
            if total == 0 {
                tracing::debug!("toggle ignored: staged duration is zero");
                return;
            }
            state.start(total);
        } else {
            state.resume();
        }
        self.shared.notify();
    }

    /// Clears the run and the staged duration, returning to idle.
    pub fn reset(&self) {
        self.shared.state().reset();
        self.shared.notify();
    }

    /// Steps one segment of the staged duration, wrapping within its range.
    ///
    /// The notification fires even when the wrap lands back on the old
    /// value.
    pub fn adjust_segment(&self, segment: Segment, direction: AdjustDirection, step: u32) {
        self.shared
            .editor()
            .adjust(self.shared.state().hms(), segment, direction, step);
        self.shared.notify();
    }

    /// Replaces the staged duration wholesale. Ignored while a run is
    /// active.
    pub fn stage(&self, value: HmsValue) {
        let state = self.shared.state();
        if state.is_active() {
            tracing::warn!("ignoring stage request while a run is active");
            return;
        }
        state.hms().store(value);
        self.shared.notify();
    }

    /// Remaining seconds in the current run.
    ///
    /// **Not side-effect-free**: reading an expired timer performs the
    /// implicit reset to idle (see [`TimerState::read_remaining_seconds`]).
    pub fn remaining_seconds(&self) -> u64 {
        self.shared.state().read_remaining_seconds()
    }

    /// True during the final [`EXPIRING_WINDOW_SECS`] of an active run.
    ///
    /// Depends on expiry detection, so querying an already-expired timer
    /// also performs the implicit reset; the call that witnesses expiry
    /// returns true and every later call returns false.
    pub fn is_expiring(&self) -> bool {
        let state = self.shared.state();
        state.target_seconds() != 0
            && state.read_remaining_seconds() < EXPIRING_WINDOW_SECS
    }

    /// Fixed-width `HH:MM:SS` display text for the current value.
    pub fn current_value(&self) -> String {
        self.shared.state().hms().load().to_string()
    }

    /// True while a run exists, whether counting or paused.
    pub fn is_active(&self) -> bool {
        self.shared.state().is_active()
    }

    /// True while the countdown is actively running.
    pub fn is_running(&self) -> bool {
        self.shared.state().is_running()
    }

    /// The engine configuration.
    pub fn config(&self) -> &TimerConfig {
        self.shared.config()
    }

    /// Signals the worker and joins it.
    ///
    /// Dropping the handle does the same; this form makes shutdown explicit.
    pub fn shutdown(mut self) {
        self.worker.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn fast_config() -> TimerConfig {
        TimerConfig::default().with_tick_interval_ms(20)
    }

    fn spawn_engine() -> (TimerEngine, Arc<AtomicUsize>) {
        let counter = Arc::new(AtomicUsize::new(0));
        let cb_counter = Arc::clone(&counter);
        let engine = TimerEngine::spawn(fast_config(), move || {
            cb_counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        (engine, counter)
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_spawn_rejects_invalid_config() {
            let config = TimerConfig::default().with_max_hours(0);
            let result = TimerEngine::spawn(config, || {});
            assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
        }

        #[test]
        fn test_spawn_starts_idle() {
            let (engine, _counter) = spawn_engine();
            assert!(!engine.is_active());
            assert!(!engine.is_running());
            assert_eq!(engine.current_value(), "00:00:00");
        }
    }

    mod toggle_tests {
        use super::*;

        #[test]
        fn test_toggle_with_zero_staged_duration_stays_idle() {
            let (engine, counter) = spawn_engine();
            engine.toggle();
            engine.toggle();
            assert!(!engine.is_active());
            assert!(!engine.is_running());
            assert_eq!(counter.load(Ordering::SeqCst), 0);
        }

        #[test]
        fn test_toggle_cycles_start_pause_resume() {
            let (engine, _counter) = spawn_engine();
            engine.stage(HmsValue::new(0, 5, 0));

            engine.toggle();
            assert!(engine.is_running());
            assert!(engine.is_active());

            engine.toggle();
            assert!(!engine.is_running());
            assert!(engine.is_active());

            engine.toggle();
            assert!(engine.is_running());
        }

        #[test]
        fn test_toggle_notifies_on_each_transition() {
            let (engine, counter) = spawn_engine();
            engine.stage(HmsValue::new(0, 5, 0));
            let after_stage = counter.load(Ordering::SeqCst);
            engine.toggle();
            engine.toggle();
            assert!(counter.load(Ordering::SeqCst) >= after_stage + 2);
        }
    }

    mod reset_tests {
        use super::*;

        #[test]
        fn test_reset_from_any_state_yields_zero_display() {
            let (engine, _counter) = spawn_engine();

            engine.reset();
            assert_eq!(engine.current_value(), "00:00:00");
            assert!(!engine.is_active());

            engine.stage(HmsValue::new(1, 2, 3));
            engine.reset();
            assert_eq!(engine.current_value(), "00:00:00");

            engine.stage(HmsValue::new(0, 1, 0));
            engine.toggle();
            engine.reset();
            assert_eq!(engine.current_value(), "00:00:00");
            assert!(!engine.is_active());
            assert!(!engine.is_running());
        }
    }

    mod adjust_tests {
        use super::*;

        #[test]
        fn test_adjust_updates_display_text() {
            let (engine, _counter) = spawn_engine();
            engine.adjust_segment(Segment::Minute, AdjustDirection::Increase, 15);
            engine.adjust_segment(Segment::Second, AdjustDirection::Decrease, 1);
            assert_eq!(engine.current_value(), "00:15:59");
        }

        #[test]
        fn test_adjust_notifies_even_without_value_change() {
            let (engine, counter) = spawn_engine();
            let before = counter.load(Ordering::SeqCst);
            // A full-range step wraps back onto the old value.
            engine.adjust_segment(Segment::Second, AdjustDirection::Increase, 60);
            assert_eq!(engine.current_value(), "00:00:00");
            assert_eq!(counter.load(Ordering::SeqCst), before + 1);
        }
    }

    mod stage_tests {
        use super::*;

        #[test]
        fn test_stage_sets_display() {
            let (engine, _counter) = spawn_engine();
            engine.stage(HmsValue::new(0, 10, 30));
            assert_eq!(engine.current_value(), "00:10:30");
        }

        #[test]
        fn test_stage_ignored_while_active() {
            let (engine, _counter) = spawn_engine();
            engine.stage(HmsValue::new(0, 5, 0));
            engine.toggle();
            engine.stage(HmsValue::new(9, 9, 9));
            let remaining = engine.remaining_seconds();
            assert!(remaining >= 299 && remaining <= 300);
        }
    }

    mod expiry_tests {
        use super::*;
        use std::time::Duration;

        #[test]
        fn test_is_expiring_only_inside_final_window() {
            let (engine, _counter) = spawn_engine();
            engine.stage(HmsValue::new(0, 1, 0));
            engine.toggle();
            assert!(!engine.is_expiring());
            engine.reset();
            assert!(!engine.is_expiring());

            engine.stage(HmsValue::new(0, 0, 5));
            engine.toggle();
            assert!(engine.is_expiring());
        }

        #[test]
        fn test_expired_query_resets_then_goes_quiet() {
            let (engine, _counter) = spawn_engine();
            engine.stage(HmsValue::new(0, 0, 1));
            engine.toggle();
            thread::sleep(Duration::from_millis(1200));

            // The worker has witnessed expiry by now; the engine is idle and
            // further queries are pure.
            assert!(!engine.is_active());
            assert!(!engine.is_running());
            assert_eq!(engine.current_value(), "00:00:00");
            assert!(!engine.is_expiring());
            assert_eq!(engine.remaining_seconds(), 0);
        }
    }
}
