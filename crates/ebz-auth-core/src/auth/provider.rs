use async_trait::async_trait;
use thiserror::Error;

use crate::api::ApiError;
use crate::models::{AuthResult, ProviderFailure};

/// Performs credential verification against a remote system.
///
/// A negative answer about the credentials is `Ok` with
/// `is_authenticated == false`; `Err` is reserved for calls that could not
/// produce an answer at all.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthResult, AuthProviderError>;
}

/// Failure of an `AuthProvider` call.
///
/// `message` is for logs only. It never reaches the caller of `attempt_login`.
#[derive(Error, Debug, Clone)]
#[error("{kind}: {message}")]
pub struct AuthProviderError {
    pub kind: ProviderFailure,
    pub message: String,
}

impl AuthProviderError {
    pub fn new(kind: ProviderFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ApiError> for AuthProviderError {
    fn from(err: ApiError) -> Self {
        Self::new(err.failure(), err.to_string())
    }
}
