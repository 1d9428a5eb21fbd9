//! Authority token codec.
//!
//! Authority tokens are the serialized, provider-agnostic wire form of a
//! profile or a project scope, carried inside the session transport:
//!
//! ```text
//! PROFILE:<profile-name>
//! SCOPE:<project-code>:<role-name>
//! ```
//!
//! Tokens are derived artifacts, never persisted; they live exactly as long
//! as the authenticated session. This module owns the one parse rule (split
//! on the delimiter, expect fixed arity) so every consumer treats malformed
//! or foreign tokens identically: as "no match", never as a crash.
//!
//! Project codes are assumed to be drawn from a delimiter-safe charset at
//! creation time elsewhere in the system; the codec does not escape `:`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use projauth_core::{Profile, ProjectScope, ScopeRole, UserAccount};

const DELIMITER: char = ':';
const PROFILE_KIND: &str = "PROFILE";
const SCOPE_KIND: &str = "SCOPE";

/// An opaque authority string owned by the session transport.
///
/// Raw token strings must never cross a component boundary: decode them
/// immediately into typed values via the functions in this module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorityToken(String);

impl AuthorityToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AuthorityToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode an account into its authority-token set: exactly one profile token
/// plus one scope token per encodable scope.
///
/// Scopes with a blank project code are silently dropped, never an error and
/// never partially encoded.
pub fn encode(account: &UserAccount) -> BTreeSet<AuthorityToken> {
    let mut tokens = BTreeSet::new();
    tokens.insert(AuthorityToken(format!(
        "{PROFILE_KIND}{DELIMITER}{}",
        account.profile.as_str()
    )));
    for scope in account.scopes.iter().filter(|scope| scope.is_encodable()) {
        tokens.insert(AuthorityToken(format!(
            "{SCOPE_KIND}{DELIMITER}{}{DELIMITER}{}",
            scope.project_code,
            scope.role.as_str()
        )));
    }
    tokens
}

/// The profile carried by the token set, if any.
///
/// If several profile tokens are present (which correct encoding never
/// produces), the lexicographically smallest trailing field wins.
pub fn profile(tokens: &BTreeSet<AuthorityToken>) -> Option<Profile> {
    tokens
        .iter()
        .filter_map(profile_field)
        .min()
        .and_then(Profile::from_name)
}

/// The role granted on `project_code`, if any.
///
/// Among several matching scope tokens the role whose canonical name sorts
/// first wins; unknown role names are discarded, not errors.
pub fn role_on_project(tokens: &BTreeSet<AuthorityToken>, project_code: &str) -> Option<ScopeRole> {
    tokens
        .iter()
        .filter_map(scope_fields)
        .filter(|(code, _)| *code == project_code)
        .filter_map(|(_, role)| ScopeRole::from_name(role))
        .min_by_key(ScopeRole::as_str)
}

/// Distinct scoped project codes, ascending.
pub fn scoped_project_codes(tokens: &BTreeSet<AuthorityToken>) -> Vec<String> {
    let mut codes: Vec<String> = tokens
        .iter()
        .filter_map(scope_fields)
        .map(|(code, _)| code.to_owned())
        .collect();
    codes.sort();
    codes.dedup();
    codes
}

/// All well-formed scope tokens as typed `(project code, role)` pairs; tokens
/// with an unrecognized role name are dropped.
pub fn account_scopes(tokens: &BTreeSet<AuthorityToken>) -> Vec<ProjectScope> {
    tokens
        .iter()
        .filter_map(scope_fields)
        .filter_map(|(code, role)| {
            ScopeRole::from_name(role).map(|role| ProjectScope::new(code, role))
        })
        .collect()
}

/// Trailing field of a well-formed profile token (arity 2).
fn profile_field(token: &AuthorityToken) -> Option<&str> {
    let mut fields = token.as_str().split(DELIMITER);
    let kind = fields.next()?;
    let name = fields.next()?;
    if kind != PROFILE_KIND || fields.next().is_some() {
        return None;
    }
    Some(name)
}

/// `(project code, role name)` of a well-formed scope token (arity 3, code
/// non-blank).
fn scope_fields(token: &AuthorityToken) -> Option<(&str, &str)> {
    let mut fields = token.as_str().split(DELIMITER);
    let kind = fields.next()?;
    let code = fields.next()?;
    let role = fields.next()?;
    if kind != SCOPE_KIND || code.trim().is_empty() || fields.next().is_some() {
        return None;
    }
    Some((code, role))
}
