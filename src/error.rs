//! Error types for the library desk client

use thiserror::Error;

/// Main client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service responded with HTTP {status}")]
    Http { status: u16 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Book {0} is not available for reservation")]
    NotReservable(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the request never produced a well-formed service envelope
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::Http { .. } | ClientError::Json(_)
        )
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::Http { status: 502 }.is_transport());
        assert!(!ClientError::NotReservable("A1".into()).is_transport());
        assert!(!ClientError::Validation("empty".into()).is_transport());
    }

    #[test]
    fn test_display() {
        let err = ClientError::NotReservable("A1".into());
        assert_eq!(err.to_string(), "Book A1 is not available for reservation");
    }
}
