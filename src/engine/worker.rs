//! Background polling worker.
//!
//! One dedicated thread per engine instance reconciles the timer state once
//! per tick: while a run is counting down it reads the remaining seconds
//! (which also detects expiry), converts them into display hour/minute/second
//! cells, and fires the update notification. The tick sleep is a channel
//! receive with timeout, so shutdown interrupts it well under a full tick.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

use crate::engine::error::EngineError;
use crate::engine::EngineShared;
use crate::types::HmsValue;

// ============================================================================
// PollingWorker
// ============================================================================

/// Handle to the engine's background polling thread.
///
/// Dropping the handle signals shutdown and joins the thread before
/// returning, so the thread never outlives the state and callback it
/// borrows through the shared [`Arc`].
#[derive(Debug)]
pub struct PollingWorker {
    shutdown_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl PollingWorker {
    /// Spawns the polling thread for `shared`, ticking every `tick`.
    pub fn spawn(shared: Arc<EngineShared>, tick: Duration) -> Result<Self, EngineError> {
        let (shutdown_tx, shutdown_rx) = bounded(1);
        let handle = thread::Builder::new()
            .name("countdown-poller".to_string())
            .spawn(move || run_loop(&shared, &shutdown_rx, tick))
            .map_err(EngineError::WorkerSpawn)?;
        Ok(Self {
            shutdown_tx,
            handle: Some(handle),
        })
    }

    /// Signals shutdown and joins the thread.
    ///
    /// A worker that cannot be joined indicates it panicked mid-tick; that
    /// is a fatal shutdown defect, not a retryable condition.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        // The receiver may already be gone if the loop exited on its own.
        let _ = self.shutdown_tx.send(());
        if handle.join().is_err() {
            panic!("countdown polling worker panicked");
        }
        tracing::debug!("polling worker joined");
    }
}

impl Drop for PollingWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Worker loop
// ============================================================================

/// One iteration per tick until shutdown is observed.
fn run_loop(shared: &EngineShared, shutdown_rx: &Receiver<()>, tick: Duration) {
    tracing::debug!(tick_ms = tick.as_millis() as u64, "polling worker started");
    loop {
        match shutdown_rx.recv_timeout(tick) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if !shared.state().is_running() {
            continue;
        }

        // Reading also reconciles expiry: on the tick where elapsed reaches
        // the target this returns 0 and the state has already reset itself.
        let remaining = shared.state().read_remaining_seconds();
        shared
            .state()
            .hms()
            .store(HmsValue::from_total_seconds(remaining));
        shared.notify();
    }
    tracing::debug!("polling worker stopped");
}

// ============================================================================
// Tests
// ============================================================================
