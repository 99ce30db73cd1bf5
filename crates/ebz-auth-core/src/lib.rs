//! Core library for ebz-login.
//!
//! Provides the credential-authentication orchestrator and the collaborators
//! it is wired to: an HTTP authentication provider, session stores and
//! connectivity probes.
//!
//! ```rust,ignore
//! let orchestrator = AuthOrchestrator::new(provider, store, connectivity);
//! match orchestrator.attempt_login(&Credentials::new("alice", "secret")).await {
//!     OutcomeStatus::Authenticated(session) => { /* navigate on */ }
//!     OutcomeStatus::InvalidCredentials => { /* ask again */ }
//!     OutcomeStatus::Offline => { /* tell the user to reconnect */ }
//!     OutcomeStatus::ProviderError(kind) => { /* retry if kind.is_transient() */ }
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiError, HttpAuthProvider};
pub use auth::{
    AuthOrchestrator, AuthProvider, AuthProviderError, ConnectivityProbe, FileSessionStore,
    FixedConnectivity, MemorySessionStore, SessionStore, TcpConnectivityProbe,
};
pub use config::Config;
pub use models::{AuthResult, Credentials, OutcomeStatus, ProviderFailure, SessionRecord};
