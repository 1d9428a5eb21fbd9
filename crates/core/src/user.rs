//! Canonical account representations.

use serde::{Deserialize, Serialize};

use crate::account::{Profile, ProjectScope};

/// The canonical account derived from fresh provider claims plus the
/// persisted record.
///
/// # Invariants
/// - `login` and `provider_name` identify the account; they always come from
///   the persisted record, never from fresh claims.
/// - For `SUPER_ADMIN`/`AUDITOR` the scope list is irrelevant to
///   authorization; for `SCOPED_USER` authorization derives solely from it.
///
/// Built once per login/refresh and consumed immediately by the authority
/// codec; it never outlives the encode step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub login: String,
    pub provider_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub picture_url: Option<String>,
    pub profile: Profile,
    pub scopes: Vec<ProjectScope>,
}

/// The authorization record kept by the user store, keyed by
/// `(login, provider_name)`.
///
/// Profile and scopes live here so a provider-side claim change can never
/// silently alter what an account is allowed to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedUser {
    pub login: String,
    pub provider_name: String,
    pub profile: Profile,
    pub scopes: Vec<ProjectScope>,
}

impl PersistedUser {
    pub fn new(
        login: impl Into<String>,
        provider_name: impl Into<String>,
        profile: Profile,
        scopes: Vec<ProjectScope>,
    ) -> Self {
        Self {
            login: login.into(),
            provider_name: provider_name.into(),
            profile,
            scopes,
        }
    }
}
