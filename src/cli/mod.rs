//! CLI module for the countdown timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//!
//! The `run` command drives one engine instance in the foreground: the
//! engine's notification callback pumps a crossbeam channel, and the main
//! thread redraws the `HH:MM:SS` value on every update until the run
//! expires.

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossbeam_channel::unbounded;

use crate::engine::TimerEngine;
use crate::types::TimerConfig;

/// Loads a [`TimerConfig`] from a JSON file.
///
/// Missing fields fall back to their defaults; the merged configuration is
/// validated before use.
pub fn load_config(path: &Path) -> Result<TimerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: TimerConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    config
        .validate()
        .map_err(|message| anyhow::anyhow!(message))
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

/// Runs a countdown in the foreground until it expires.
pub fn run_countdown(args: &RunArgs) -> Result<()> {
    if args.duration.is_zero() {
        bail!("duration must be non-zero");
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => TimerConfig::default(),
    };
    if let Some(tick_ms) = args.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    let tick = Duration::from_millis(config.tick_interval_ms);

    let (update_tx, update_rx) = unbounded();
    let engine = TimerEngine::spawn(config, move || {
        // Runs on the worker thread; just wake the render loop.
        let _ = update_tx.send(());
    })
    .context("failed to start timer engine")?;

    engine.stage(args.duration);
    engine.toggle();
    Display::show_started(&args.duration);

    while engine.is_active() {
        // Wake on every notification, with one tick as a fallback so a
        // missed send cannot hang the loop.
        let _ = update_rx.recv_timeout(tick);
        Display::show_tick(&engine.current_value(), engine.is_expiring());
    }

    Display::show_done();
    engine.shutdown();
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
