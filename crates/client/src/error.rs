//! Client-side error type.
//!
//! Captured HTTP responses are never errors, whatever their status code. The
//! only failure a client operation can produce is a broken transport.

use thiserror::Error;
use verso_kernel::ScenarioError;

#[derive(Error, Debug)]
pub enum ClientError {
    /// DNS, connection, TLS, or body-read failure; no response was captured.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<ClientError> for ScenarioError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(inner) => ScenarioError::transport(inner.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_infrastructure_failures() {
        // Build a genuine reqwest error from an invalid URL parse at request time.
        let err = reqwest::Client::new().get("http://").build().unwrap_err();
        let scenario_err = ScenarioError::from(ClientError::Transport(err));
        assert!(scenario_err.is_infrastructure());
    }
}
