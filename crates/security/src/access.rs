//! Permission policy: profile + role-on-project → allow/deny.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use projauth_core::{Profile, ScopeRole};

use crate::session::SessionAuthorityStore;

/// The coarse action kind being authorized. Every protected operation maps to
/// exactly one of these.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourcePermission {
    /// Non-mutating access.
    Fetch,
    /// Mutating access.
    Alter,
}

/// Project existence lookup, implemented by the project domain elsewhere.
pub trait ProjectService: Send + Sync {
    fn exists(&self, project_code: &str) -> bool;
}

/// Pure policy decision.
///
/// - No IO
/// - No panics
/// - No session access (inputs are explicit)
///
/// `SUPER_ADMIN` and `AUDITOR` decisions are independent of
/// `role_on_project`; for `SCOPED_USER` the role is the sole input, and an
/// absent role denies everything.
pub fn evaluate(
    profile: Profile,
    role_on_project: Option<ScopeRole>,
    permission: ResourcePermission,
) -> bool {
    match profile {
        Profile::SuperAdmin => true,
        Profile::Auditor => permission == ResourcePermission::Fetch,
        Profile::ScopedUser => match role_on_project {
            Some(ScopeRole::Admin | ScopeRole::Maintainer) => true,
            Some(ScopeRole::Member) => permission == ResourcePermission::Fetch,
            None => false,
        },
    }
}

/// Per-request guard for project-scoped resources.
pub struct ProjectResourceAccess {
    projects: Arc<dyn ProjectService>,
    session: SessionAuthorityStore,
}

impl ProjectResourceAccess {
    pub fn new(projects: Arc<dyn ProjectService>, session: SessionAuthorityStore) -> Self {
        Self { projects, session }
    }

    /// Can the current session exercise `permission` on `project_code`?
    ///
    /// Existence is checked **before** authorization, so an unknown project
    /// and a forbidden-but-existing project are indistinguishable to the
    /// caller.
    pub fn is_enabled(&self, project_code: &str, permission: ResourcePermission) -> bool {
        if project_code.trim().is_empty() {
            return false;
        }

        if !self.projects.exists(project_code) {
            return false;
        }

        let Some(profile) = self.session.profile() else {
            tracing::debug!(project_code, "permission check without a session profile");
            return false;
        };

        // Only scoped users derive anything from the role; skip the lookup
        // for the other profiles.
        let role_on_project = match profile {
            Profile::ScopedUser => self.session.role_on_project(project_code),
            _ => None,
        };

        evaluate(profile, role_on_project, permission)
    }
}
