//! Data models for a login attempt.
//!
//! - `Credentials`: the username/password pair for one attempt (never persisted)
//! - `AuthResult`: what an `AuthProvider` reports back
//! - `SessionRecord`: the persisted session for the signed-in user
//! - `OutcomeStatus`, `ProviderFailure`: the normalized result handed to callers

pub mod auth_result;
pub mod credentials;
pub mod outcome;
pub mod session;

pub use auth_result::AuthResult;
pub use credentials::Credentials;
pub use outcome::{OutcomeStatus, ProviderFailure};
pub use session::SessionRecord;
