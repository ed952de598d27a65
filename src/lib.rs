//! Countdown Timer Library
//!
//! This library provides the core functionality for the countdown timer CLI
//! and for embedding the timer in other front-ends. It includes:
//! - A lock-free timer engine (start/pause/resume/reset/edit) polled by a
//!   dedicated background thread
//! - Staged hour/minute/second editing with per-segment wraparound
//! - Pointer/scroll input dispatch mapping display zones to segments
//! - CLI command parsing and display utilities
//! - Configuration types with JSON (de)serialization
//!
//! One behavior worth knowing before embedding: reading the remaining time
//! of an expired run resets the engine to idle as a side effect. See
//! [`engine::TimerState::read_remaining_seconds`].

pub mod cli;
pub mod engine;
pub mod input;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{EngineError, TimerEngine, EXPIRING_WINDOW_SECS};
pub use input::{segment_at, InputDispatcher, PointerButton, ScrollDirection};
pub use types::{AdjustDirection, HmsParseError, HmsValue, Segment, TimerConfig};
