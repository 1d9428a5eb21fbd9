//! Black-box flow: provider claims → canonical account → authority tokens →
//! session queries → permission decisions → mid-session refresh.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use projauth_core::{PersistedUser, Profile, ProjectScope, ScopeRole};
use projauth_security::{
    AuthorityRefresher, NormalizerRegistry, ProjectResourceAccess, ProjectService,
    ProviderAuthentication, ProviderClaims, ResourcePermission, Session, SessionAuthorityStore,
    UserStore,
};

struct KnownProjects(BTreeSet<String>);

impl ProjectService for KnownProjects {
    fn exists(&self, project_code: &str) -> bool {
        self.0.contains(project_code)
    }
}

#[derive(Default)]
struct InMemoryUsers {
    records: RwLock<HashMap<(String, String), PersistedUser>>,
}

impl InMemoryUsers {
    fn upsert(&self, user: PersistedUser) {
        self.records
            .write()
            .expect("user store lock")
            .insert((user.login.clone(), user.provider_name.clone()), user);
    }
}

impl UserStore for InMemoryUsers {
    fn find_by_login_and_provider(&self, login: &str, provider_name: &str) -> Option<PersistedUser> {
        self.records
            .read()
            .expect("user store lock")
            .get(&(login.to_owned(), provider_name.to_owned()))
            .cloned()
    }
}

#[test]
fn scoped_user_login_permissions_and_refresh() {
    projauth_observability::init();

    let registry = NormalizerRegistry::standard();
    let users = Arc::new(InMemoryUsers::default());
    users.upsert(PersistedUser::new(
        "jdoe",
        "github",
        Profile::ScopedUser,
        vec![
            ProjectScope::new("proj-a", ScopeRole::Admin),
            ProjectScope::new("proj-b", ScopeRole::Member),
        ],
    ));

    // Login: normalize fresh provider claims against the persisted record.
    let claims: ProviderClaims = [
        ("login", "jdoe"),
        ("name", "Jane Q Doe"),
        ("email", "jane@example.com"),
        ("avatar_url", "https://example.com/jane.png"),
    ]
    .into_iter()
    .collect();

    let normalizer = registry.select("github").expect("github is registered");
    let login = normalizer.login(&claims).expect("claims carry a login");
    let persisted = users
        .find_by_login_and_provider(&login, "github")
        .expect("user is persisted");
    let account = normalizer.user_account(&claims, &persisted);

    assert_eq!(account.first_name.as_deref(), Some("Jane"));
    assert_eq!(account.last_name.as_deref(), Some("Doe"));

    let authorities = projauth_security::authority::encode(&account);
    assert_eq!(authorities.len(), 3);

    let session = Arc::new(Session::authenticated(ProviderAuthentication {
        provider_name: "github".to_owned(),
        principal: claims,
        authorities,
    }));
    let store = SessionAuthorityStore::new(Arc::clone(&session));
    let projects = Arc::new(KnownProjects(
        ["proj-a", "proj-b", "proj-c"].iter().map(|c| (*c).to_owned()).collect(),
    ));
    let access = ProjectResourceAccess::new(projects, store.clone());

    assert!(access.is_enabled("proj-a", ResourcePermission::Alter));
    assert!(!access.is_enabled("proj-b", ResourcePermission::Alter));
    assert!(access.is_enabled("proj-b", ResourcePermission::Fetch));
    // proj-c exists but the account holds no scope on it.
    assert!(!access.is_enabled("proj-c", ResourcePermission::Fetch));

    // An administrator promotes the user on proj-b and drops proj-a.
    users.upsert(PersistedUser::new(
        "jdoe",
        "github",
        Profile::ScopedUser,
        vec![ProjectScope::new("proj-b", ScopeRole::Maintainer)],
    ));

    AuthorityRefresher::new(NormalizerRegistry::standard(), users, Arc::clone(&session))
        .refresh_current_account_authorities()
        .expect("refresh should succeed");

    assert_eq!(store.scoped_project_codes(), vec!["proj-b"]);
    assert!(access.is_enabled("proj-b", ResourcePermission::Alter));
    assert!(!access.is_enabled("proj-a", ResourcePermission::Fetch));
}
