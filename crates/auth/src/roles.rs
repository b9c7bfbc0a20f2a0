//! Actor roles.
//!
//! Roles are a closed set enforced by the type system; there is no string
//! dispatch anywhere past the serde boundary. A role is immutable for the
//! lifetime of an account.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use jobnexus_core::DomainError;

/// The four actor classes of the system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Satisfies every capability check unconditionally. Exactly one exists.
    Superadmin,
    /// Delegated administrator; acts only within its snapshot capability set.
    Subadmin,
    Employer,
    Candidate,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Subadmin => "subadmin",
            Role::Employer => "employer",
            Role::Candidate => "candidate",
        }
    }

    /// Roles a caller may pick at self-registration.
    pub fn is_registrable(&self) -> bool {
        matches!(self, Role::Employer | Role::Candidate)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "subadmin" => Ok(Role::Subadmin),
            "employer" => Ok(Role::Employer),
            "candidate" => Ok(Role::Candidate),
            other => Err(DomainError::invalid_input(format!("invalid role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for role in [Role::Superadmin, Role::Subadmin, Role::Employer, Role::Candidate] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn only_employer_and_candidate_self_register() {
        assert!(Role::Employer.is_registrable());
        assert!(Role::Candidate.is_registrable());
        assert!(!Role::Superadmin.is_registrable());
        assert!(!Role::Subadmin.is_registrable());
    }

    #[test]
    fn unknown_role_is_invalid_input() {
        let err = "moderator".parse::<Role>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
