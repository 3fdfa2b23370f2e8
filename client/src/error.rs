//! Error taxonomy for AppCenter API calls.
//!
//! Raised errors are left for page-level code to catch and display; only the
//! settings-refresh path recovers locally (see [`crate::Client::init_ui`]).

use thiserror::Error;

/// Fixed message for non-success responses that carry no `detail` field.
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401, raised before the body is read.
    #[error("Unauthorized")]
    Unauthorized,
    /// Non-success response; the message is the server's `detail` when
    /// present, [`GENERIC_FAILURE`] otherwise.
    #[error("{0}")]
    Request(String),
    /// A JSON body was required but the response carried something else.
    #[error("expected a JSON response")]
    NotJson,
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    /// Token storage failure, surfaced unmodified.
    #[error(transparent)]
    Storage(#[from] std::io::Error),
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    #[must_use]
    pub fn request_failed(detail: Option<String>) -> Self {
        Self::Request(detail.unwrap_or_else(|| GENERIC_FAILURE.to_string()))
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, GENERIC_FAILURE};

    #[test]
    fn detail_is_surfaced_verbatim() {
        let err = ApiError::request_failed(Some("bad input".to_string()));
        assert_eq!(err.to_string(), "bad input");
    }

    #[test]
    fn missing_detail_uses_generic_message() {
        let err = ApiError::request_failed(None);
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn unauthorized_message_is_fixed() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized");
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::request_failed(None).is_unauthorized());
    }
}
