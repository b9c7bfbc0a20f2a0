//! Token claims model (transport-agnostic).

use serde::{Deserialize, Serialize};

use jobnexus_core::UserId;

use crate::{Capability, Role};

/// The self-contained identity assertion carried by every bearer token.
///
/// `permissions` is a snapshot taken at issuance: permission changes to a
/// sub-administrator do not retroactively affect already-issued tokens.
/// Expiry is the only invalidation mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account) identifier.
    pub sub: UserId,

    /// Actor class at issuance. Roles are immutable, so this never goes stale.
    pub role: Role,

    /// Capability snapshot; only meaningful when `role` is subadmin.
    #[serde(default)]
    pub permissions: Vec<Capability>,

    /// Issued-at (seconds since epoch).
    pub iat: i64,

    /// Absolute expiry (seconds since epoch).
    pub exp: i64,
}
