//! Error types for ignux-core

use thiserror::Error;

/// Result type alias using ignux-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ignux-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote call failed: non-2xx status, or no response at all (`status` is `None`)
    #[error("Request to {endpoint} failed ({}): {message}", describe_status(*.status))]
    RequestFailed {
        status: Option<u16>,
        endpoint: String,
        message: String,
    },

    /// Remote call succeeded but the body could not be decoded
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key-value store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status of a failed request, when the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this error came from talking to the remote backend.
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed { .. } | Self::InvalidResponse { .. }
        )
    }
}

fn describe_status(status: Option<u16>) -> String {
    status.map_or_else(|| "no response".to_string(), |code| format!("HTTP {code}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display_includes_status_and_endpoint() {
        let error = Error::RequestFailed {
            status: Some(404),
            endpoint: "GET /services/slug/missing".to_string(),
            message: "Service not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Request to GET /services/slug/missing failed (HTTP 404): Service not found"
        );
        assert_eq!(error.status(), Some(404));
        assert!(error.is_remote());
    }

    #[test]
    fn network_failure_has_no_status() {
        let error = Error::RequestFailed {
            status: None,
            endpoint: "GET /blog".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(error.to_string().contains("no response"));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn local_errors_are_not_remote() {
        assert!(!Error::InvalidInput("empty".to_string()).is_remote());
        assert!(!Error::Storage("disk full".to_string()).is_remote());
    }
}
