//! Timer engine error types.
//!
//! The engine's state machine is total: every reachable transition is valid
//! and no operation returns an error. The only fallible points are engine
//! construction (bad configuration, worker thread spawn failure), defined
//! here.

use thiserror::Error;

/// Errors that can occur while constructing a timer engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The supplied configuration failed validation.
    #[error("invalid timer configuration: {0}")]
    InvalidConfig(String),

    /// The OS refused to spawn the polling worker thread.
    #[error("failed to spawn polling worker thread")]
    WorkerSpawn(#[source] std::io::Error),
}

impl EngineError {
    /// Returns true if this error came from configuration validation.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::InvalidConfig("max_hours must be in the range 1-100".to_string());
        assert!(err.to_string().contains("invalid timer configuration"));
        assert!(err.to_string().contains("max_hours"));
        assert!(err.is_config_error());

        let err = EngineError::WorkerSpawn(std::io::Error::other("no threads"));
        assert!(err.to_string().contains("polling worker"));
        assert!(!err.is_config_error());
    }
}
