use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one call to an `AuthProvider`.
///
/// When `is_authenticated` is false the remaining fields carry no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub is_authenticated: bool,
    pub username: String,
    pub token: String,
    pub valid_to: DateTime<Utc>,
    pub role: String,
}

impl AuthResult {
    pub fn accepted(
        username: impl Into<String>,
        token: impl Into<String>,
        valid_to: DateTime<Utc>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            is_authenticated: true,
            username: username.into(),
            token: token.into(),
            valid_to,
            role: role.into(),
        }
    }

    /// A negative answer: the provider did not recognise the username/password pair.
    pub fn rejected(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: false,
            username: username.into(),
            token: String::new(),
            valid_to: DateTime::<Utc>::default(),
            role: String::new(),
        }
    }
}
