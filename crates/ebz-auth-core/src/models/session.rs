use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::AuthResult;

/// The persisted session of the signed-in user.
///
/// There is a single slot per device; saving a new record replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SessionRecord {
    pub username: String,
    pub token: String,
    pub valid_until: NaiveDate,
    pub role: String,
}

impl SessionRecord {
    /// Build a record from a successful provider answer.
    /// Only the calendar date (UTC) of the expiry timestamp is kept.
    pub fn from_auth_result(result: &AuthResult) -> Self {
        Self {
            username: result.username.clone(),
            token: result.token.clone(),
            valid_until: result.valid_to.date_naive(),
            role: result.role.clone(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Utc::now().date_naive())
    }

    /// Expired once `today` is past `valid_until`; the last valid day still counts.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        today > self.valid_until
    }

    /// Days left until expiry (for display)
    pub fn days_until_expiry(&self) -> i64 {
        (self.valid_until - Utc::now().date_naive()).num_days().max(0)
    }
}
