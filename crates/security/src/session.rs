//! Explicit session handle and the read-only authority view over it.
//!
//! The session owns the authority-token set for exactly one authenticated
//! identity; there is no ambient global. Handles are threaded explicitly
//! through every component that needs them, which keeps permission checks
//! testable with plain inputs.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use projauth_core::{Profile, ProjectScope, ScopeRole};

use crate::authority::{self, AuthorityToken};
use crate::claims::ProviderClaims;

/// A provider-backed authentication: the raw principal, the provider it came
/// from, and the authority tokens derived at login or refresh time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAuthentication {
    pub provider_name: String,
    pub principal: ProviderClaims,
    pub authorities: BTreeSet<AuthorityToken>,
}

/// One logical session.
///
/// Readers take a snapshot of the whole authentication object; the refresher
/// replaces it as a single atomic swap. Concurrent readers therefore never
/// observe a half-updated token set.
#[derive(Debug, Default)]
pub struct Session {
    current: RwLock<Option<ProviderAuthentication>>,
}

impl Session {
    /// A session with no authenticated identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(authentication: ProviderAuthentication) -> Self {
        Self {
            current: RwLock::new(Some(authentication)),
        }
    }

    /// Snapshot of the current authentication, if any.
    pub fn current(&self) -> Option<ProviderAuthentication> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Atomically replace the whole authentication object.
    pub fn replace(&self, authentication: ProviderAuthentication) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(authentication);
    }

    /// The current token set; empty when unauthenticated.
    pub fn authorities(&self) -> BTreeSet<AuthorityToken> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|authentication| authentication.authorities.clone())
            .unwrap_or_default()
    }
}

/// Read-only, typed view over the session's decoded token set.
///
/// Every query decodes on the fly, so a refresh is visible to the very next
/// call on the same store.
#[derive(Clone)]
pub struct SessionAuthorityStore {
    session: Arc<Session>,
}

impl SessionAuthorityStore {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The session's profile, if authenticated and carrying a valid profile
    /// token.
    pub fn profile(&self) -> Option<Profile> {
        authority::profile(&self.session.authorities())
    }

    /// The session's role on `project_code`, if any.
    ///
    /// Returned even for `SUPER_ADMIN`/`AUDITOR` sessions when a scope token
    /// is present; the permission evaluator simply never consults it.
    pub fn role_on_project(&self, project_code: &str) -> Option<ScopeRole> {
        if project_code.trim().is_empty() {
            return None;
        }
        authority::role_on_project(&self.session.authorities(), project_code)
    }

    /// Distinct scoped project codes, ascending.
    pub fn scoped_project_codes(&self) -> Vec<String> {
        authority::scoped_project_codes(&self.session.authorities())
    }

    /// All of the session's scopes as typed pairs.
    pub fn account_scopes(&self) -> Vec<ProjectScope> {
        authority::account_scopes(&self.session.authorities())
    }
}
