//! `matreq-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the role
//! hierarchy, the role→permission table, session claims and their codec,
//! and the allow/deny guard live here. Wiring them in front of routes is
//! the API crate's job.

pub mod claims;
pub mod guard;
pub mod identity;
pub mod permissions;
pub mod roles;
pub mod token;

pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use guard::{Denial, require_permission, require_role};
pub use identity::Identity;
pub use permissions::{Permission, has_permission, permissions_of};
pub use roles::{Role, rank_of};
pub use token::{Hs256SessionCodec, SessionVerifier};
