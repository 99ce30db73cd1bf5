use thiserror::Error;

use crate::models::ProviderFailure;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(truncated),
            code => ApiError::UnexpectedStatus {
                status: code,
                body: truncated,
            },
        }
    }

    /// Whether the server said no to the credentials themselves.
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::AccessDenied(_))
    }

    /// Collapse into the caller-facing failure kind.
    pub fn failure(&self) -> ProviderFailure {
        match self {
            ApiError::NetworkError(e) if e.is_timeout() => ProviderFailure::Timeout,
            ApiError::NetworkError(e) if e.is_decode() => ProviderFailure::MalformedResponse,
            ApiError::NetworkError(_) => ProviderFailure::Transport,
            ApiError::InvalidResponse(_) => ProviderFailure::MalformedResponse,
            ApiError::RateLimited | ApiError::ServerError(_) => ProviderFailure::Unavailable,
            ApiError::Unauthorized
            | ApiError::AccessDenied(_)
            | ApiError::UnexpectedStatus { .. } => ProviderFailure::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "no"),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, ""),
            ApiError::UnexpectedStatus { status: 404, .. }
        ));
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(
            ApiError::ServerError("boom".into()).failure(),
            ProviderFailure::Unavailable
        );
        assert_eq!(ApiError::RateLimited.failure(), ProviderFailure::Unavailable);
        assert_eq!(
            ApiError::InvalidResponse("x".into()).failure(),
            ProviderFailure::MalformedResponse
        );
        assert_eq!(
            ApiError::UnexpectedStatus { status: 404, body: String::new() }.failure(),
            ProviderFailure::Rejected
        );
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 100);
        match ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            ApiError::ServerError(msg) => {
                assert!(msg.contains("truncated"));
                assert!(msg.len() < body.len());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
