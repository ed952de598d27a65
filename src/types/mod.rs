//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Segment identification and adjustment direction
//! - Plain hour/minute/second values and their text form
//! - Timer configuration with validation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Segment
// ============================================================================

/// One independently editable field of the staged duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// The hour field
    Hour,
    /// The minute field
    Minute,
    /// The second field
    Second,
}

impl Segment {
    /// Returns the string representation of the segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Hour => "hour",
            Segment::Minute => "minute",
            Segment::Second => "second",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// AdjustDirection
// ============================================================================

/// Direction of a segment adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustDirection {
    /// Increment the segment
    Increase,
    /// Decrement the segment
    Decrease,
}

impl AdjustDirection {
    /// Applies the direction's sign to an unsigned step.
    pub fn signed_step(&self, step: u32) -> i64 {
        match self {
            AdjustDirection::Increase => i64::from(step),
            AdjustDirection::Decrease => -i64::from(step),
        }
    }
}

// ============================================================================
// HmsValue
// ============================================================================

/// A plain hour/minute/second triple.
///
/// Used for staging a duration from the CLI and for formatting the display
/// text. Minute and second are always below 60; the hour bound is enforced
/// by [`TimerConfig::max_hours`] at edit time, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmsValue {
    /// Hours component
    pub hour: u8,
    /// Minutes component (0-59)
    pub minute: u8,
    /// Seconds component (0-59)
    pub second: u8,
}

impl HmsValue {
    /// Creates a new value from its components.
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Converts a remaining-seconds count into its display components.
    pub fn from_total_seconds(total: u64) -> Self {
        Self {
            hour: (total / 3600) as u8,
            minute: ((total % 3600) / 60) as u8,
            second: (total % 60) as u8,
        }
    }

    /// Returns the total number of seconds this value represents.
    pub fn to_total_seconds(&self) -> u64 {
        u64::from(self.hour) * 3600 + u64::from(self.minute) * 60 + u64::from(self.second)
    }

    /// Returns true if all components are zero.
    pub fn is_zero(&self) -> bool {
        self.hour == 0 && self.minute == 0 && self.second == 0
    }
}

impl fmt::Display for HmsValue {
    /// Formats as fixed-width `HH:MM:SS`, two zero-padded digits per field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Errors that can occur when parsing a duration string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HmsParseError {
    /// The string does not look like `[[H:]MM:]SS`.
    #[error("invalid duration '{0}', expected SS, MM:SS or H:MM:SS")]
    Malformed(String),

    /// A field was numeric but out of its allowed range.
    #[error("{field} value {value} is out of range (max {max})")]
    OutOfRange {
        /// Which field was out of range
        field: &'static str,
        /// The offending value
        value: u64,
        /// The largest accepted value
        max: u64,
    },
}

impl FromStr for HmsValue {
    type Err = HmsParseError;

    /// Parses `SS`, `MM:SS` or `H:MM:SS` into an [`HmsValue`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || HmsParseError::Malformed(s.to_string());

        if s.trim().is_empty() {
            return Err(malformed());
        }

        let fields: Vec<u64> = s
            .split(':')
            .map(|part| part.trim().parse::<u64>())
            .collect::<Result<_, _>>()
            .map_err(|_| malformed())?;

        let (hour, minute, second) = match fields.as_slice() {
            [second] => (0, 0, *second),
            [minute, second] => (0, *minute, *second),
            [hour, minute, second] => (*hour, *minute, *second),
            _ => return Err(malformed()),
        };

        let check = |field: &'static str, value: u64, max: u64| {
            if value > max {
                Err(HmsParseError::OutOfRange { field, value, max })
            } else {
                Ok(())
            }
        };
        check("hour", hour, 99)?;
        check("minute", minute, 59)?;
        check("second", second, 59)?;

        Ok(HmsValue::new(hour as u8, minute as u8, second as u8))
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Configuration for the countdown timer engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Hour wraparound modulus: staged hours cycle in `0..max_hours` (1-100)
    pub max_hours: u8,
    /// Polling worker tick interval in milliseconds (10-60000)
    pub tick_interval_ms: u64,
    /// Hours added per double-click on the hour zone
    pub hour_step: u32,
    /// Minutes added per double-click on the minute zone
    pub minute_step: u32,
    /// Seconds added per double-click on the second zone
    pub second_step: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            max_hours: 24,
            tick_interval_ms: 1000,
            hour_step: 1,
            minute_step: 15,
            second_step: 30,
        }
    }
}

impl TimerConfig {
    /// Creates a new configuration with the specified hour wrap modulus.
    pub fn with_max_hours(mut self, max_hours: u8) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Creates a new configuration with the specified tick interval.
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Returns the double-click step for a segment.
    pub fn step_for(&self, segment: Segment) -> u32 {
        match segment {
            Segment::Hour => self.hour_step,
            Segment::Minute => self.minute_step,
            Segment::Second => self.second_step,
        }
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_hours < 1 || self.max_hours > 100 {
            return Err("max_hours must be in the range 1-100".to_string());
        }
        if self.tick_interval_ms < 10 || self.tick_interval_ms > 60_000 {
            return Err("tick_interval_ms must be in the range 10-60000".to_string());
        }
        if self.hour_step == 0 || self.minute_step == 0 || self.second_step == 0 {
            return Err("segment steps must be non-zero".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
