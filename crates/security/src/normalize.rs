//! Per-provider account normalization strategies.
//!
//! Each identity provider ships claims under different field names. A
//! normalizer maps those raw claims plus the persisted local record into one
//! canonical [`UserAccount`]. Adding a provider means adding one strategy type
//! plus a registration entry, never a scattered string-conditional.

use std::collections::HashMap;

use thiserror::Error;

use projauth_core::{PersistedUser, UserAccount};

use crate::claims::ProviderClaims;

/// Strategy turning raw provider claims + a persisted record into the
/// canonical account.
///
/// Pure transformation: no I/O, no side effects. Implementations only declare
/// which claim fields their provider uses; the shared behavior lives in the
/// provided methods.
pub trait AccountNormalizer: Send + Sync + std::fmt::Debug {
    /// Claim holding the provider-stable login identifier.
    fn login_claim(&self) -> &'static str;

    /// Claim holding the display ("full") name.
    fn full_name_claim(&self) -> &'static str;

    /// Claim holding the e-mail address.
    fn email_claim(&self) -> &'static str;

    /// Claim holding the avatar/picture URL.
    fn picture_url_claim(&self) -> &'static str;

    /// The provider-stable identifier, absent if the provider sent no usable
    /// login claim.
    fn login(&self, claims: &ProviderClaims) -> Option<String> {
        claims.get_str(self.login_claim()).map(str::to_owned)
    }

    /// First token of the trimmed full-name claim, if any.
    fn first_name(&self, claims: &ProviderClaims) -> Option<String> {
        split_full_name(claims.get_str(self.full_name_claim())).0
    }

    /// Last token of the trimmed full-name claim, absent when the name has a
    /// single token. Middle tokens are discarded.
    fn last_name(&self, claims: &ProviderClaims) -> Option<String> {
        split_full_name(claims.get_str(self.full_name_claim())).1
    }

    fn email(&self, claims: &ProviderClaims) -> Option<String> {
        claims.get_str(self.email_claim()).map(str::to_owned)
    }

    fn picture_url(&self, claims: &ProviderClaims) -> Option<String> {
        claims.get_str(self.picture_url_claim()).map(str::to_owned)
    }

    /// Build the canonical account.
    ///
    /// Identity and authorization (login, provider, profile, scopes) come
    /// from the **persisted** record, so a provider-side claim change can
    /// never silently alter authorization. Display fields come from the
    /// fresh claims.
    fn user_account(&self, claims: &ProviderClaims, persisted: &PersistedUser) -> UserAccount {
        let (first_name, last_name) = split_full_name(claims.get_str(self.full_name_claim()));
        UserAccount {
            login: persisted.login.clone(),
            provider_name: persisted.provider_name.clone(),
            first_name,
            last_name,
            email: self.email(claims),
            picture_url: self.picture_url(claims),
            profile: persisted.profile,
            scopes: persisted.scopes.clone(),
        }
    }
}

/// Trim, then split on whitespace: no tokens yields neither name, one token
/// yields a first name only, two or more yield the first and the **last**
/// token (middles discarded).
fn split_full_name(full_name: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(name) = full_name else {
        return (None, None);
    };
    let mut parts = name.split_whitespace();
    let first = parts.next().map(str::to_owned);
    let last = parts.next_back().map(str::to_owned);
    (first, last)
}

/// GitHub claim layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct GithubNormalizer;

impl AccountNormalizer for GithubNormalizer {
    fn login_claim(&self) -> &'static str {
        "login"
    }

    fn full_name_claim(&self) -> &'static str {
        "name"
    }

    fn email_claim(&self) -> &'static str {
        "email"
    }

    fn picture_url_claim(&self) -> &'static str {
        "avatar_url"
    }
}

/// Google claim layout (standard OIDC claims; the address doubles as login).
#[derive(Debug, Default, Clone, Copy)]
pub struct GoogleNormalizer;

impl AccountNormalizer for GoogleNormalizer {
    fn login_claim(&self) -> &'static str {
        "email"
    }

    fn full_name_claim(&self) -> &'static str {
        "name"
    }

    fn email_claim(&self) -> &'static str {
        "email"
    }

    fn picture_url_claim(&self) -> &'static str {
        "picture"
    }
}

/// Generic OIDC claim layout for custom providers (`sub` as login).
#[derive(Debug, Default, Clone, Copy)]
pub struct OidcNormalizer;

impl AccountNormalizer for OidcNormalizer {
    fn login_claim(&self) -> &'static str {
        "sub"
    }

    fn full_name_claim(&self) -> &'static str {
        "name"
    }

    fn email_claim(&self) -> &'static str {
        "email"
    }

    fn picture_url_claim(&self) -> &'static str {
        "picture"
    }
}

/// An unknown provider name at strategy-selection time is a deployment or
/// programmer error, never a user-facing authorization failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no account normalizer registered for provider '{0}'")]
    UnknownProvider(String),
}

/// Closed, enumerable strategy set keyed by provider name.
pub struct NormalizerRegistry {
    by_provider: HashMap<String, Box<dyn AccountNormalizer>>,
}

impl NormalizerRegistry {
    pub fn empty() -> Self {
        Self {
            by_provider: HashMap::new(),
        }
    }

    /// Registry with the built-in providers: `github`, `google`, `oidc`.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("github", Box::new(GithubNormalizer));
        registry.register("google", Box::new(GoogleNormalizer));
        registry.register("oidc", Box::new(OidcNormalizer));
        registry
    }

    pub fn register(&mut self, provider_name: impl Into<String>, normalizer: Box<dyn AccountNormalizer>) {
        self.by_provider.insert(provider_name.into(), normalizer);
    }

    pub fn select(&self, provider_name: &str) -> Result<&dyn AccountNormalizer, ConfigurationError> {
        self.by_provider
            .get(provider_name)
            .map(|normalizer| normalizer.as_ref())
            .ok_or_else(|| ConfigurationError::UnknownProvider(provider_name.to_owned()))
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projauth_core::{Profile, ProjectScope, ScopeRole};

    fn github_claims(full_name: Option<&str>) -> ProviderClaims {
        let mut claims: ProviderClaims = [
            ("login", "user-login"),
            ("email", "user-email"),
            ("avatar_url", "user-picture-url"),
        ]
        .into_iter()
        .collect();
        if let Some(name) = full_name {
            claims.insert("name", name);
        }
        claims
    }

    #[test]
    fn blank_full_name_yields_neither_first_nor_last_name() {
        let normalizer = GithubNormalizer;
        for full_name in [None, Some(""), Some(" "), Some("\t"), Some("\n")] {
            let claims = github_claims(full_name);
            assert_eq!(normalizer.first_name(&claims), None);
            assert_eq!(normalizer.last_name(&claims), None);
        }
    }

    #[test]
    fn single_part_full_name_yields_first_name_only() {
        let normalizer = GithubNormalizer;
        let claims = github_claims(Some("  user-first-name  "));

        assert_eq!(normalizer.first_name(&claims).as_deref(), Some("user-first-name"));
        assert_eq!(normalizer.last_name(&claims), None);
    }

    #[test]
    fn multi_part_full_name_keeps_first_and_last_parts() {
        let normalizer = GithubNormalizer;
        for full_name in [
            "        user-first-name     user-last-name     ",
            "  user-first-name   and-some middle names to ignore   user-last-name  ",
        ] {
            let claims = github_claims(Some(full_name));
            assert_eq!(normalizer.first_name(&claims).as_deref(), Some("user-first-name"));
            assert_eq!(normalizer.last_name(&claims).as_deref(), Some("user-last-name"));
        }
    }

    #[test]
    fn user_account_takes_identity_from_persisted_record_and_display_from_claims() {
        let normalizer = GithubNormalizer;
        let claims = github_claims(Some("Jane Q Doe"));
        let persisted = PersistedUser::new(
            "persisted-login",
            "github",
            Profile::ScopedUser,
            vec![ProjectScope::new("proj-a", ScopeRole::Admin)],
        );

        let account = normalizer.user_account(&claims, &persisted);

        assert_eq!(account.login, "persisted-login");
        assert_eq!(account.provider_name, "github");
        assert_eq!(account.profile, Profile::ScopedUser);
        assert_eq!(account.scopes, persisted.scopes);
        assert_eq!(account.first_name.as_deref(), Some("Jane"));
        assert_eq!(account.last_name.as_deref(), Some("Doe"));
        assert_eq!(account.email.as_deref(), Some("user-email"));
        assert_eq!(account.picture_url.as_deref(), Some("user-picture-url"));
    }

    #[test]
    fn google_login_is_the_email_claim() {
        let claims: ProviderClaims = [("email", "jane@example.com"), ("name", "Jane Doe")]
            .into_iter()
            .collect();

        assert_eq!(GoogleNormalizer.login(&claims).as_deref(), Some("jane@example.com"));
        assert_eq!(OidcNormalizer.login(&claims), None);
    }

    #[test]
    fn missing_login_claim_is_absent_not_empty() {
        let claims = ProviderClaims::new();
        assert_eq!(GithubNormalizer.login(&claims), None);
    }

    #[test]
    fn registry_selects_registered_providers() {
        let registry = NormalizerRegistry::standard();
        assert!(registry.select("github").is_ok());
        assert!(registry.select("google").is_ok());
        assert!(registry.select("oidc").is_ok());
    }

    #[test]
    fn registry_fails_with_configuration_error_for_unknown_provider() {
        let registry = NormalizerRegistry::standard();
        let err = registry.select("gitlab").unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownProvider("gitlab".to_owned()));
    }
}
