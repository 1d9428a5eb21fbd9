//! Profiles, per-project roles and scopes.

use serde::{Deserialize, Serialize};

/// Coarse account tier, independent of any project.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profile {
    /// Unrestricted access to every project and every operation.
    SuperAdmin,
    /// Read-only access to every project.
    Auditor,
    /// Access derives solely from the account's project scopes.
    ScopedUser,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::SuperAdmin => "SUPER_ADMIN",
            Profile::Auditor => "AUDITOR",
            Profile::ScopedUser => "SCOPED_USER",
        }
    }

    /// Parse a profile name, case-insensitively. Unknown names are `None`,
    /// never an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "SUPER_ADMIN" => Some(Profile::SuperAdmin),
            "AUDITOR" => Some(Profile::Auditor),
            "SCOPED_USER" => Some(Profile::ScopedUser),
            _ => None,
        }
    }
}

impl core::fmt::Display for Profile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role granted on a single project.
///
/// Totally ordered by privilege: `ADMIN > MAINTAINER > MEMBER`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeRole {
    Member,
    Maintainer,
    Admin,
}

impl ScopeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeRole::Admin => "ADMIN",
            ScopeRole::Maintainer => "MAINTAINER",
            ScopeRole::Member => "MEMBER",
        }
    }

    /// Parse a role name, case-insensitively. Unknown names are `None`,
    /// never an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(ScopeRole::Admin),
            "MAINTAINER" => Some(ScopeRole::Maintainer),
            "MEMBER" => Some(ScopeRole::Member),
            _ => None,
        }
    }
}

impl core::fmt::Display for ScopeRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-project grant: which role the account holds on which project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectScope {
    pub project_code: String,
    pub role: ScopeRole,
}

impl ProjectScope {
    pub fn new(project_code: impl Into<String>, role: ScopeRole) -> Self {
        Self {
            project_code: project_code.into(),
            role,
        }
    }

    /// A scope with a blank project code must never be encoded into an
    /// authority token.
    pub fn is_encodable(&self) -> bool {
        !self.project_code.trim().is_empty()
    }
}
