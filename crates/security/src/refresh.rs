//! Mid-session authority refresh.
//!
//! Invoked whenever scopes may have changed under an already-live session,
//! e.g. an administrator just edited a user's roles. The refresher re-derives
//! the canonical account from the persisted record and swaps the session's
//! whole authentication object in one step.

use std::sync::Arc;

use thiserror::Error;

use projauth_core::PersistedUser;

use crate::authority;
use crate::normalize::NormalizerRegistry;
use crate::session::{ProviderAuthentication, Session};

/// Persisted-record lookup, keyed by `(login, provider)`.
pub trait UserStore: Send + Sync {
    fn find_by_login_and_provider(&self, login: &str, provider_name: &str)
        -> Option<PersistedUser>;
}

/// The uniform refresh failure.
///
/// Carries no detail on purpose: "not authenticated", "unknown provider" and
/// "persisted user vanished" must stay indistinguishable to the caller, so a
/// failed refresh cannot be used to enumerate accounts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("forbidden")]
pub struct ForbiddenError;

/// Re-derives the current account and replaces the session's authority set.
pub struct AuthorityRefresher {
    registry: NormalizerRegistry,
    users: Arc<dyn UserStore>,
    session: Arc<Session>,
}

impl AuthorityRefresher {
    pub fn new(registry: NormalizerRegistry, users: Arc<dyn UserStore>, session: Arc<Session>) -> Self {
        Self {
            registry,
            users,
            session,
        }
    }

    /// Re-run normalization and encoding, then atomically swap the session's
    /// authentication.
    ///
    /// Either the whole pipeline succeeds and the swap happens, or the prior
    /// session state is left untouched. Any permission check issued after a
    /// completed refresh observes the updated scopes.
    pub fn refresh_current_account_authorities(&self) -> Result<(), ForbiddenError> {
        let authentication = self.session.current().ok_or(ForbiddenError)?;

        let normalizer = self
            .registry
            .select(&authentication.provider_name)
            .map_err(|_| ForbiddenError)?;

        let login = normalizer
            .login(&authentication.principal)
            .ok_or(ForbiddenError)?;

        let persisted = self
            .users
            .find_by_login_and_provider(&login, &authentication.provider_name)
            .ok_or(ForbiddenError)?;

        let account = normalizer.user_account(&authentication.principal, &persisted);
        let authorities = authority::encode(&account);

        tracing::debug!(
            provider = %authentication.provider_name,
            authorities = authorities.len(),
            "refreshed session authorities"
        );

        self.session.replace(ProviderAuthentication {
            provider_name: authentication.provider_name,
            principal: authentication.principal,
            authorities,
        });
        Ok(())
    }
}
