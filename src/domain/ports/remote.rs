//! Errors surfaced by the remote platform's REST surface

use thiserror::Error;

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure of a single remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The addressed object does not exist. Drivers treat this as a
    /// control-flow signal ("create it"), not as a failure.
    #[error("remote object not found: {0}")]
    NotFound(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("request failed: {0}")]
    Transport(String),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_body() {
        let err = RemoteError::Http {
            status: 500,
            body: r#"{"error_code":"INTERNAL_ERROR"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"HTTP 500: {"error_code":"INTERNAL_ERROR"}"#
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_detected() {
        assert!(RemoteError::NotFound("job 42".to_string()).is_not_found());
    }
}
