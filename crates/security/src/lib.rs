//! `projauth-security` — project-scoped authorization core.
//!
//! This crate turns heterogeneous provider claims into one canonical account,
//! encodes that account into a flat authority-token set owned by the session,
//! and answers "can this identity FETCH or ALTER resources in project X".
//!
//! It is intentionally decoupled from HTTP and storage: the OAuth2 handshake,
//! token transport and persistence sit behind the [`ProjectService`],
//! [`UserStore`] and [`Session`] seams.

pub mod access;
pub mod authority;
pub mod claims;
pub mod normalize;
pub mod refresh;
pub mod session;

pub use access::{evaluate, ProjectResourceAccess, ProjectService, ResourcePermission};
pub use authority::AuthorityToken;
pub use claims::ProviderClaims;
pub use normalize::{
    AccountNormalizer, ConfigurationError, GithubNormalizer, GoogleNormalizer, NormalizerRegistry,
    OidcNormalizer,
};
pub use refresh::{AuthorityRefresher, ForbiddenError, UserStore};
pub use session::{ProviderAuthentication, Session, SessionAuthorityStore};
