//! Error taxonomy for backend calls.
//!
//! Every failure a page can hit ends up as an [`ApiError`]. Pages turn it
//! into text with [`ApiError::user_message`] at the rendering edge.

use thiserror::Error;

pub const MISSING_TOKEN_MESSAGE: &str = "No authentication token found. Please log in.";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Please check your token or log in again.";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";
pub const NETWORK_MESSAGE: &str = "Failed to fetch data. Please try again later.";
pub const TIMEOUT_MESSAGE: &str =
    "Request timed out. Please check your connection or try again later.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";
pub const RENDER_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";
pub const EMPTY_RESULTS_MESSAGE: &str = "No results found.";

/// Failure below the HTTP layer: nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("request aborted")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No bearer token is stored; the request was never sent.
    #[error("no authentication token")]
    MissingToken,

    /// Login was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// HTTP 401 on an authenticated request.
    #[error("unauthorized")]
    Unauthorized,

    /// HTTP 404.
    #[error("not found")]
    NotFound,

    /// Any other 4xx, usually with a server-provided explanation.
    #[error("request rejected ({status})")]
    Validation { status: u16, message: Option<String> },

    /// 5xx or an unexpected status.
    #[error("server error ({status})")]
    Server { status: u16, message: Option<String> },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    /// The response was not the media type the caller asked for.
    #[error("expected {expected}, got {actual}")]
    UnexpectedContentType { expected: String, actual: String },

    /// The body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The request could not be built from caller input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A newer request replaced this one before it finished.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            400..=499 => Self::Validation { status, message },
            _ => Self::Server { status, message },
        }
    }

    /// Text shown to the user. `fallback` covers server errors without a
    /// message of their own.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::MissingToken => MISSING_TOKEN_MESSAGE.to_string(),
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            Self::NotFound => NOT_FOUND_MESSAGE.to_string(),
            Self::Validation { message, .. } | Self::Server { message, .. } => message
                .clone()
                .unwrap_or_else(|| fallback.to_string()),
            Self::Timeout => TIMEOUT_MESSAGE.to_string(),
            Self::Network(_) => NETWORK_MESSAGE.to_string(),
            Self::UnexpectedContentType { .. } | Self::Decode(_) => fallback.to_string(),
            Self::InvalidRequest(reason) => reason.clone(),
            Self::Cancelled => String::new(),
        }
    }

    /// Whether the session must be dropped and the user sent to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::MissingToken | Self::Unauthorized)
    }

    /// Transient failures are worth a manual retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound => Some(404),
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => Self::Timeout,
            TransportError::Network(reason) => Self::Network(reason),
            TransportError::Aborted => Self::Cancelled,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Failed to fetch students. Please try again later.";

    #[test]
    fn test_from_status_classification() {
        assert_eq!(ApiError::from_status(401, None), ApiError::Unauthorized);
        assert_eq!(
            ApiError::from_status(404, Some("Course not found".into())),
            ApiError::NotFound
        );
        assert_eq!(
            ApiError::from_status(422, Some("Email already exists".into())),
            ApiError::Validation {
                status: 422,
                message: Some("Email already exists".into())
            }
        );
        assert_eq!(
            ApiError::from_status(503, None),
            ApiError::Server {
                status: 503,
                message: None
            }
        );
    }

    #[test]
    fn test_blank_server_message_is_dropped() {
        assert_eq!(
            ApiError::from_status(500, Some("  ".into())),
            ApiError::Server {
                status: 500,
                message: None
            }
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ApiError::MissingToken.user_message(FALLBACK),
            "No authentication token found. Please log in."
        );
        assert_eq!(
            ApiError::Unauthorized.user_message(FALLBACK),
            "Unauthorized: Please check your token or log in again."
        );
        assert_eq!(ApiError::NotFound.user_message(FALLBACK), "Resource not found.");
        assert_eq!(
            ApiError::Network("connection refused".into()).user_message(FALLBACK),
            "Failed to fetch data. Please try again later."
        );
        assert_eq!(
            ApiError::Timeout.user_message(FALLBACK),
            "Request timed out. Please check your connection or try again later."
        );
    }

    #[test]
    fn test_server_message_preferred_over_fallback() {
        let with_message = ApiError::from_status(500, Some("Database unavailable".into()));
        let without_message = ApiError::from_status(500, None);

        assert_eq!(with_message.user_message(FALLBACK), "Database unavailable");
        assert_eq!(without_message.user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn test_requires_login() {
        assert!(ApiError::MissingToken.requires_login());
        assert!(ApiError::Unauthorized.requires_login());
        assert!(!ApiError::NotFound.requires_login());
        assert!(!ApiError::InvalidCredentials.requires_login());
        assert!(!ApiError::Timeout.requires_login());
    }

    #[test]
    fn test_transport_conversion() {
        assert_eq!(ApiError::from(TransportError::Timeout), ApiError::Timeout);
        assert_eq!(ApiError::from(TransportError::Aborted), ApiError::Cancelled);
        assert!(ApiError::from(TransportError::Network("dns".into())).is_transient());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(ApiError::from_status(409, None).status(), Some(409));
        assert_eq!(ApiError::Timeout.status(), None);
    }
}
