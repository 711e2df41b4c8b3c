//! Response envelope used by every library service endpoint

use serde::{Deserialize, Serialize};

/// `{status, data?, message?}` envelope.
/// `status: false` is an application-level rejection, not a transport failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Acknowledgement returned by write endpoints; any payload is ignored
pub type WriteAck = ApiResponse<serde_json::Value>;

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;

    #[test]
    fn test_ack_without_data() {
        let ack: WriteAck = serde_json::from_str(r#"{"status":true}"#).unwrap();
        assert!(ack.status);
        assert!(ack.data.is_none());
    }

    #[test]
    fn test_failure_with_message() {
        let response: ApiResponse<Vec<Book>> =
            serde_json::from_str(r#"{"status":false,"message":"No books found"}"#).unwrap();
        assert!(!response.status);
        assert_eq!(response.message.as_deref(), Some("No books found"));
    }
}
