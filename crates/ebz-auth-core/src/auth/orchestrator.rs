use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use super::{AuthProvider, ConnectivityProbe, SessionStore};
use crate::models::{Credentials, OutcomeStatus, ProviderFailure, SessionRecord};

/// Runs a login attempt against injected collaborators.
///
/// Every attempt yields an `OutcomeStatus`; nothing is returned as an error.
/// Callers serialize attempts themselves (e.g. by disabling the submit action
/// while one is outstanding); concurrent successes race last-writer-wins on
/// the session store.
#[derive(Clone)]
pub struct AuthOrchestrator {
    provider: Arc<dyn AuthProvider>,
    store: Arc<dyn SessionStore>,
    connectivity: Arc<dyn ConnectivityProbe>,
}

impl AuthOrchestrator {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        store: Arc<dyn SessionStore>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            provider,
            store,
            connectivity,
        }
    }

    pub async fn attempt_login(&self, credentials: &Credentials) -> OutcomeStatus {
        let username = credentials.username.as_str();

        if !self.connectivity.is_connected() {
            info!(%username, "Login skipped: offline");
            return OutcomeStatus::Offline;
        }

        debug!(%username, "Authenticating");
        let call = self.provider.authenticate(username, &credentials.password);

        let result = match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(%username, kind = ?e.kind, error = %e, "Login failed");
                return OutcomeStatus::ProviderError(e.kind);
            }
            Err(_) => {
                error!(%username, "Auth provider panicked");
                return OutcomeStatus::ProviderError(ProviderFailure::Internal);
            }
        };

        if !result.is_authenticated {
            info!(%username, "Login rejected: invalid credentials");
            return OutcomeStatus::InvalidCredentials;
        }

        let record = SessionRecord::from_auth_result(&result);
        self.store.save(record.clone());
        info!(
            username = %record.username,
            role = %record.role,
            valid_until = %record.valid_until,
            "Login successful"
        );
        OutcomeStatus::Authenticated(record)
    }

    /// The stored session, if it has not expired.
    pub fn current_session(&self) -> Option<SessionRecord> {
        self.store.load().filter(|record| !record.is_expired())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_session().is_some()
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
