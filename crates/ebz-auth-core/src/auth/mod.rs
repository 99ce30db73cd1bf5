//! Authentication orchestration and its collaborators.
//!
//! This module provides:
//! - `AuthOrchestrator`: runs a login attempt and normalizes the outcome
//! - `AuthProvider`: remote credential verification (see `api::HttpAuthProvider`)
//! - `SessionStore`: single-slot session persistence (`FileSessionStore`, `MemorySessionStore`)
//! - `ConnectivityProbe`: reachability check done before any network call

pub mod connectivity;
pub mod orchestrator;
pub mod provider;
pub mod store;

pub use connectivity::{ConnectivityProbe, FixedConnectivity, TcpConnectivityProbe};
pub use orchestrator::AuthOrchestrator;
pub use provider::{AuthProvider, AuthProviderError};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
