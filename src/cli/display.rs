//! Display utilities for the countdown timer CLI.
//!
//! This module provides formatted output for:
//! - Run start and completion messages
//! - The in-place ticking `HH:MM:SS` readout
//! - Error messages

use std::io::{self, Write};

use crate::types::HmsValue;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the run-start message.
    pub fn show_started(duration: &HmsValue) {
        println!("* counting down {}", duration);
    }

    /// Redraws the current value in place.
    ///
    /// The `!` marker appears during the final seconds of the run, where a
    /// widget front-end would apply its "expiring" style class.
    pub fn show_tick(value: &str, expiring: bool) {
        let marker = if expiring { "!" } else { " " };
        print!("\r{} {}", marker, value);
        let _ = io::stdout().flush();
    }

    /// Shows the completion message.
    pub fn show_done() {
        println!("\r  00:00:00");
        println!("[] time is up");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}
