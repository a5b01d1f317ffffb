//! Scenario-level failure taxonomy.
//!
//! Every failure is local to the scenario that produced it; the runner never
//! aborts siblings. Captured non-2xx responses are ordinary results and do
//! not appear here — only broken expectations, broken transport, and broken
//! decoding do.

use thiserror::Error;

/// What went wrong inside one scenario.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// An expectation about status, body content, headers, or timing was not
    /// met.
    #[error("assertion failed: {message}")]
    Assertion { message: String },

    /// No response was captured at all: DNS, connection, TLS, or an
    /// interrupted body read. Reported as an infrastructure failure, never as
    /// a domain assertion failure.
    #[error("transport failure: {detail}")]
    Transport { detail: String },

    /// The response body did not parse into the requested resource shape.
    #[error("failed to decode response body into {target}: {detail}")]
    Decode { target: String, detail: String },
}

impl ScenarioError {
    /// Create an assertion failure
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Create a transport failure
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// Create a decode failure naming the target type
    pub fn decode(target: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Decode {
            target: target.into(),
            detail: detail.into(),
        }
    }

    /// Transport failures are infrastructure problems, not test verdicts.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_the_target_type() {
        let err = ScenarioError::decode("Book", "missing field");
        assert!(err.to_string().contains("Book"));
        assert!(!err.is_infrastructure());
    }

    #[test]
    fn only_transport_counts_as_infrastructure() {
        assert!(ScenarioError::transport("connection refused").is_infrastructure());
        assert!(!ScenarioError::assertion("expected 200").is_infrastructure());
    }
}
