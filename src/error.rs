//! Engine error types.

use thiserror::Error;

/// Errors raised by the signal engine.
///
/// Both kinds are atomic: a failed construction yields no engine, and a failed
/// observation leaves the engine exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// Parameters that cannot produce a working engine.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A price (or restored state) the engine refuses to ingest.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl SignalError {
    #[must_use]
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        SignalError::InvalidConfiguration(msg.into())
    }

    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        SignalError::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SignalError::invalid_configuration("period must be at least 2, got 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: period must be at least 2, got 1"
        );

        let err = SignalError::invalid_input("price must be finite, got NaN");
        assert_eq!(err.to_string(), "invalid input: price must be finite, got NaN");
    }
}
