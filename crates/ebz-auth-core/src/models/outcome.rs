use serde::{Deserialize, Serialize};

use super::SessionRecord;

/// Normalized result of a login attempt. Exactly one is produced per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(tag = "status", content = "detail")]
pub enum OutcomeStatus {
    /// Provider accepted the credentials; the record has been handed to the session store.
    Authenticated(SessionRecord),
    /// Provider explicitly rejected the username/password pair.
    InvalidCredentials,
    /// No connectivity; the provider was never called.
    Offline,
    /// Any other provider failure.
    ProviderError(ProviderFailure),
}

impl OutcomeStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, OutcomeStatus::Authenticated(_))
    }

    pub fn session(&self) -> Option<&SessionRecord> {
        match self {
            OutcomeStatus::Authenticated(record) => Some(record),
            _ => None,
        }
    }
}

/// Why a provider call failed.
///
/// Callers that only care that the call failed can match `ProviderError(_)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum ProviderFailure {
    /// The request did not complete within the transport's timeout.
    Timeout,
    /// Connection could not be established or was dropped.
    Transport,
    /// Remote service is overloaded or failing (5xx, 429).
    Unavailable,
    /// Remote service refused the request for a reason other than bad credentials.
    Rejected,
    /// Response could not be understood.
    MalformedResponse,
    /// The provider panicked.
    Internal,
}

impl ProviderFailure {
    /// Whether re-invoking the attempt later may succeed without any change from the user.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            ProviderFailure::Timeout | ProviderFailure::Transport | ProviderFailure::Unavailable
        )
    }
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ProviderFailure::Timeout => "timed out",
            ProviderFailure::Transport => "transport failure",
            ProviderFailure::Unavailable => "service unavailable",
            ProviderFailure::Rejected => "request rejected",
            ProviderFailure::MalformedResponse => "malformed response",
            ProviderFailure::Internal => "internal provider failure",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_failures() {
        assert!(ProviderFailure::Timeout.is_transient());
        assert!(ProviderFailure::Transport.is_transient());
        assert!(ProviderFailure::Unavailable.is_transient());
        assert!(!ProviderFailure::Rejected.is_transient());
        assert!(!ProviderFailure::MalformedResponse.is_transient());
        assert!(!ProviderFailure::Internal.is_transient());
    }

    #[test]
    fn test_session_accessor() {
        assert!(OutcomeStatus::Offline.session().is_none());
        assert!(!OutcomeStatus::InvalidCredentials.is_authenticated());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(OutcomeStatus::ProviderError(ProviderFailure::Timeout))
            .unwrap();
        assert_eq!(json["status"], "ProviderError");
        assert_eq!(json["detail"], "Timeout");

        let json = serde_json::to_value(OutcomeStatus::Offline).unwrap();
        assert_eq!(json["status"], "Offline");
    }
}
