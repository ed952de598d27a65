//! Pointer and scroll input dispatch.
//!
//! Translates raw pointer events into the three engine operations (toggle,
//! reset, adjust-duration). Rendering is somebody else's problem; this layer
//! only knows the display's total width and maps it into three equal zones,
//! hour/minute/second, left to right. That spatial mapping is a contract any
//! front-end must honor.

use crate::engine::TimerEngine;
use crate::types::{AdjustDirection, Segment};

// ============================================================================
// Event types
// ============================================================================

/// A pointer button of interest to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary (left) button: start/pause/resume
    Primary,
    /// Secondary (right) button: reset
    Secondary,
}

/// Direction of one scroll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Scroll up: increment
    Up,
    /// Scroll down: decrement
    Down,
}

impl From<ScrollDirection> for AdjustDirection {
    fn from(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Up => AdjustDirection::Increase,
            ScrollDirection::Down => AdjustDirection::Decrease,
        }
    }
}

// ============================================================================
// Segment targeting
// ============================================================================

/// Maps a horizontal offset within the display to a segment.
///
/// The display is split into three equal zones: `floor(x / (width / 3))`.
/// Offsets outside `0..width` (or a non-positive width) hit no zone.
pub fn segment_at(total_width: f64, x: f64) -> Option<Segment> {
    if total_width <= 0.0 || x < 0.0 {
        return None;
    }
    let zone = (x / (total_width / 3.0)) as u32;
    match zone {
        0 => Some(Segment::Hour),
        1 => Some(Segment::Minute),
        2 => Some(Segment::Second),
        _ => None,
    }
}

// ============================================================================
// InputDispatcher
// ============================================================================

/// Dispatches pointer and scroll events to engine operations.
#[derive(Debug)]
pub struct InputDispatcher<'a> {
    engine: &'a TimerEngine,
}

impl<'a> InputDispatcher<'a> {
    /// Creates a dispatcher for the given engine.
    pub fn new(engine: &'a TimerEngine) -> Self {
        Self { engine }
    }

    /// Single press: primary toggles, secondary resets.
    pub fn button_press(&self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.engine.toggle(),
            PointerButton::Secondary => self.engine.reset(),
        }
    }

    /// Double-click on a segment zone bumps that segment by its configured
    /// fixed step.
    pub fn double_click(&self, total_width: f64, x: f64) {
        let Some(segment) = segment_at(total_width, x) else {
            tracing::error!(total_width, x, "double-click outside any segment zone");
            return;
        };
        let step = self.engine.config().step_for(segment);
        self.engine
            .adjust_segment(segment, AdjustDirection::Increase, step);
    }

    /// One scroll tick steps the targeted segment by one.
    ///
    /// Ignored entirely while the timer is active, running or paused.
    pub fn scroll(&self, direction: ScrollDirection, total_width: f64, x: f64) {
        if self.engine.is_active() {
            tracing::debug!("scroll ignored while timer is active");
            return;
        }
        let Some(segment) = segment_at(total_width, x) else {
            tracing::error!(total_width, x, "scroll outside any segment zone");
            return;
        };
        self.engine.adjust_segment(segment, direction.into(), 1);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HmsValue, TimerConfig};

    fn spawn_engine() -> TimerEngine {
        let config = TimerConfig::default().with_tick_interval_ms(20);
        TimerEngine::spawn(config, || {}).unwrap()
    }

    // ------------------------------------------------------------------------
    // segment_at Tests
    // ------------------------------------------------------------------------

    mod segment_at_tests {
        use super::*;

        #[test]
        fn test_three_equal_zones() {
            assert_eq!(segment_at(300.0, 0.0), Some(Segment::Hour));
            assert_eq!(segment_at(300.0, 99.9), Some(Segment::Hour));
            assert_eq!(segment_at(300.0, 100.0), Some(Segment::Minute));
            assert_eq!(segment_at(300.0, 199.9), Some(Segment::Minute));
            assert_eq!(segment_at(300.0, 200.0), Some(Segment::Second));
            assert_eq!(segment_at(300.0, 299.9), Some(Segment::Second));
        }

        #[test]
        fn test_out_of_range_offsets_hit_no_zone() {
            assert_eq!(segment_at(300.0, 300.0), None);
            assert_eq!(segment_at(300.0, 450.0), None);
            assert_eq!(segment_at(300.0, -1.0), None);
        }

        #[test]
        fn test_degenerate_width_hits_no_zone() {
            assert_eq!(segment_at(0.0, 10.0), None);
            assert_eq!(segment_at(-50.0, 10.0), None);
        }
    }

    // ------------------------------------------------------------------------
    // InputDispatcher Tests
    // ------------------------------------------------------------------------

    mod dispatcher_tests {
        use super::*;

        #[test]
        fn test_primary_press_toggles() {
            let engine = spawn_engine();
            engine.stage(HmsValue::new(0, 5, 0));
            let dispatcher = InputDispatcher::new(&engine);

            dispatcher.button_press(PointerButton::Primary);
            assert!(engine.is_running());
            dispatcher.button_press(PointerButton::Primary);
            assert!(!engine.is_running());
            assert!(engine.is_active());
        }

        #[test]
        fn test_secondary_press_resets() {
            let engine = spawn_engine();
            engine.stage(HmsValue::new(0, 5, 0));
            let dispatcher = InputDispatcher::new(&engine);

            dispatcher.button_press(PointerButton::Primary);
            dispatcher.button_press(PointerButton::Secondary);
            assert!(!engine.is_active());
            assert_eq!(engine.current_value(), "00:00:00");
        }

        #[test]
        fn test_double_click_uses_fixed_steps() {
            let engine = spawn_engine();
            let dispatcher = InputDispatcher::new(&engine);

            dispatcher.double_click(300.0, 50.0); // hour zone
            dispatcher.double_click(300.0, 150.0); // minute zone
            dispatcher.double_click(300.0, 250.0); // second zone
            assert_eq!(engine.current_value(), "01:15:30");
        }

        #[test]
        fn test_double_click_outside_zones_is_ignored() {
            let engine = spawn_engine();
            let dispatcher = InputDispatcher::new(&engine);
            dispatcher.double_click(300.0, 350.0);
            assert_eq!(engine.current_value(), "00:00:00");
        }

        #[test]
        fn test_scroll_adjusts_by_one() {
            let engine = spawn_engine();
            let dispatcher = InputDispatcher::new(&engine);

            dispatcher.scroll(ScrollDirection::Up, 300.0, 150.0);
            assert_eq!(engine.current_value(), "00:01:00");
            dispatcher.scroll(ScrollDirection::Down, 300.0, 250.0);
            assert_eq!(engine.current_value(), "00:01:59");
        }

        #[test]
        fn test_scroll_ignored_while_active() {
            let engine = spawn_engine();
            engine.stage(HmsValue::new(0, 5, 0));
            let dispatcher = InputDispatcher::new(&engine);

            dispatcher.button_press(PointerButton::Primary);
            dispatcher.scroll(ScrollDirection::Up, 300.0, 150.0);
            let remaining = engine.remaining_seconds();
            assert!(remaining >= 299 && remaining <= 300);

            // Still ignored while merely paused.
            dispatcher.button_press(PointerButton::Primary);
            dispatcher.scroll(ScrollDirection::Up, 300.0, 150.0);
            assert!(engine.is_active());
        }
    }
}
