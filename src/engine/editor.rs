//! Staged-duration editing.
//!
//! The editor steps individual hour/minute/second segments of the staged
//! configuration, wrapping each within its natural range. Edits are only
//! meaningful while no run is active; the input layer enforces that for
//! scroll events, matching the source widget's behavior.

use crate::engine::state::HmsCells;
use crate::types::{AdjustDirection, Segment};

// ============================================================================
// DurationEditor
// ============================================================================

/// Mutates the staged hour/minute/second configuration.
#[derive(Debug, Clone)]
pub struct DurationEditor {
    /// Hour wraparound modulus; minute and second always wrap at 60.
    max_hours: u8,
}

impl DurationEditor {
    /// Creates an editor with the given hour wrap modulus.
    pub fn new(max_hours: u8) -> Self {
        Self { max_hours }
    }

    /// Steps one segment by `step` in the given direction, wrapping within
    /// the segment's range.
    ///
    /// The modulus is added before taking the remainder so that decrements
    /// below zero wrap to the top of the range.
    pub fn adjust(
        &self,
        cells: &HmsCells,
        segment: Segment,
        direction: AdjustDirection,
        step: u32,
    ) {
        let modulus = i64::from(self.modulus_for(segment));
        let old = i64::from(cells.get(segment));
        let new = (old + direction.signed_step(step) + modulus).rem_euclid(modulus);
        cells.set(segment, new as u8);
        tracing::debug!(segment = %segment, old, new, "segment adjusted");
    }

    /// Total seconds represented by the staged configuration.
    pub fn to_total_seconds(&self, cells: &HmsCells) -> u64 {
        cells.load().to_total_seconds()
    }

    fn modulus_for(&self, segment: Segment) -> u8 {
        match segment {
            Segment::Hour => self.max_hours,
            Segment::Minute | Segment::Second => 60,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
