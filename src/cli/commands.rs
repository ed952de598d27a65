//! Command definitions for the countdown timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::HmsValue;

// ============================================================================
// CLI Structure
// ============================================================================

/// Countdown Timer CLI - a terminal countdown with a lock-free engine
#[derive(Parser, Debug)]
#[command(
    name = "countdown",
    version,
    about = "Terminal countdown timer",
    long_about = "Counts a configured hour/minute/second duration down to zero \
                  in the terminal.\nThe engine behind it is lock-free and can \
                  also be embedded as a library.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a countdown in the foreground
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Duration to count down, as SS, MM:SS or H:MM:SS
    pub duration: HmsValue,

    /// Override the polling tick interval in milliseconds (10-60000)
    #[arg(
        long,
        value_parser = clap::value_parser!(u64).range(10..=60_000)
    )]
    pub tick_ms: Option<u64>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================
