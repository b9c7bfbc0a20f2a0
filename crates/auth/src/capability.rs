//! The fixed capability vocabulary granted to sub-administrators.

use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use jobnexus_core::DomainError;

/// A named permission a subadmin may or may not hold.
///
/// The vocabulary is closed: assigning anything outside it fails at
/// subadmin creation or update time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "MANAGE_JOBS")]
    ManageJobs,
    #[serde(rename = "MANAGE_USERS")]
    ManageUsers,
    #[serde(rename = "APPROVE_EMPLOYERS")]
    ApproveEmployers,
    #[serde(rename = "VIEW_REPORTS")]
    ViewReports,
    #[serde(rename = "MANAGE_BLOG")]
    ManageBlog,
}

/// Snapshot capability set carried on tokens and subadmin accounts.
pub type CapabilitySet = BTreeSet<Capability>;

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageJobs => "MANAGE_JOBS",
            Capability::ManageUsers => "MANAGE_USERS",
            Capability::ApproveEmployers => "APPROVE_EMPLOYERS",
            Capability::ViewReports => "VIEW_REPORTS",
            Capability::ManageBlog => "MANAGE_BLOG",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANAGE_JOBS" => Ok(Capability::ManageJobs),
            "MANAGE_USERS" => Ok(Capability::ManageUsers),
            "APPROVE_EMPLOYERS" => Ok(Capability::ApproveEmployers),
            "VIEW_REPORTS" => Ok(Capability::ViewReports),
            "MANAGE_BLOG" => Ok(Capability::ManageBlog),
            other => Err(DomainError::invalid_input(format!(
                "invalid capability: {other}"
            ))),
        }
    }
}

/// Parse a list of capability names, rejecting the whole list on the first
/// unknown name.
pub fn parse_capabilities<I, S>(names: I) -> Result<CapabilitySet, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|n| n.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_round_trips() {
        for name in [
            "MANAGE_JOBS",
            "MANAGE_USERS",
            "APPROVE_EMPLOYERS",
            "VIEW_REPORTS",
            "MANAGE_BLOG",
        ] {
            assert_eq!(name.parse::<Capability>().unwrap().as_str(), name);
        }
    }

    #[test]
    fn unknown_capability_rejected() {
        let err = parse_capabilities(["MANAGE_JOBS", "DELETE_EVERYTHING"]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(err.to_string().contains("DELETE_EVERYTHING"));
    }

    #[test]
    fn serde_uses_screaming_snake_names() {
        let json = serde_json::to_string(&Capability::ApproveEmployers).unwrap();
        assert_eq!(json, "\"APPROVE_EMPLOYERS\"");
    }
}
