//! `jobnexus-auth` — authentication and authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to hash credentials, mint and validate identity tokens, and decide
//! allow/deny for a resolved principal. Identity *resolution* (looking the
//! account up and rejecting blocked ones) happens in the API layer before
//! anything here is consulted.

pub mod authorize;
pub mod capability;
pub mod claims;
pub mod password;
pub mod reset;
pub mod roles;
pub mod token;

pub use authorize::{authorize, Principal, Requirement};
pub use capability::{Capability, CapabilitySet};
pub use claims::Claims;
pub use password::{hash_password, validate_new_password, verify_password};
pub use reset::{generate_reset_secret, hash_reset_secret, ResetToken};
pub use roles::Role;
pub use token::TokenService;
