//! `projauth-core` — canonical account model shared across the workspace.
//!
//! This crate contains **pure domain** value types (no services, no I/O).

pub mod account;
pub mod user;

pub use account::{Profile, ProjectScope, ScopeRole};
pub use user::{PersistedUser, UserAccount};
