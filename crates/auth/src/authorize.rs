//! Authorization engine: allow/deny for a resolved principal.
//!
//! Identity resolution (token validation, store lookup, blocked-account
//! rejection) happens *before* anything here runs; a blocked account never
//! reaches an `authorize` call.

use jobnexus_core::{DomainError, DomainResult, UserId};

use crate::{Capability, CapabilitySet, Claims, Role};

/// A fully resolved caller identity for authorization decisions.
///
/// The capability set is the snapshot taken from the token at issuance, not
/// a live read of the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
    pub permissions: CapabilitySet,
}

impl From<&Claims> for Principal {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
            permissions: claims.permissions.iter().copied().collect(),
        }
    }
}

/// What an operation demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement<'a> {
    /// Exact role-set membership; no capability involved.
    AnyRole(&'a [Role]),

    /// A moderator action: superadmin passes unconditionally, subadmin
    /// passes iff the capability is in its snapshot set, everyone else is
    /// denied regardless of any role match.
    Capability(Capability),
}

/// Pure policy check: no IO, no panics.
pub fn authorize(principal: &Principal, required: Requirement<'_>) -> DomainResult<()> {
    match required {
        Requirement::AnyRole(roles) => {
            if roles.contains(&principal.role) {
                Ok(())
            } else {
                Err(DomainError::forbidden("access denied"))
            }
        }
        Requirement::Capability(cap) => match principal.role {
            Role::Superadmin => Ok(()),
            Role::Subadmin if principal.permissions.contains(&cap) => Ok(()),
            Role::Subadmin => Err(DomainError::forbidden("permission denied")),
            _ => Err(DomainError::forbidden("access denied")),
        },
    }
}
