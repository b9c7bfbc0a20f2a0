//! User accounts and their lifecycle state machine.
//!
//! # Invariants
//! - Role is immutable after creation.
//! - Exactly one superadmin exists after startup seeding, and it can never
//!   be blocked.
//! - A blocked account fails every authenticated operation before any
//!   role or permission evaluation.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use jobnexus_auth::{CapabilitySet, Role};
use jobnexus_core::{DomainError, DomainResult, UserId};

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Awaiting moderation; may authenticate but not act (employers start here).
    Pending,
    Active,
    /// Locked out of every authenticated operation.
    Blocked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Pending => "pending",
            AccountStatus::Active => "active",
            AccountStatus::Blocked => "blocked",
        }
    }
}

impl core::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AccountStatus::Pending),
            "active" => Ok(AccountStatus::Active),
            "blocked" => Ok(AccountStatus::Blocked),
            other => Err(DomainError::invalid_input(format!("invalid status: {other}"))),
        }
    }
}

/// Validated input for self-registration.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// A user account of any role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Absent for federated identities.
    pub password_hash: Option<String>,
    pub role: Role,
    /// Only meaningful for subadmins; empty otherwise.
    #[serde(default)]
    pub permissions: CapabilitySet,
    pub status: AccountStatus,
    /// Moderator that approved this account (employers only).
    pub approved_by: Option<UserId>,
    /// Creating actor, for audit (subadmins only).
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

fn normalize_email(email: &str) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::invalid_input("invalid email format"));
    }
    Ok(email)
}

fn normalize_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::invalid_input("name cannot be empty"));
    }
    Ok(name.to_string())
}

impl User {
    /// Self-registration. Only employer and candidate roles are accepted;
    /// employers start `pending` and must be approved before they may act,
    /// candidates start `active`.
    pub fn register(reg: NewRegistration, now: DateTime<Utc>) -> DomainResult<User> {
        if !reg.role.is_registrable() {
            return Err(DomainError::invalid_input(
                "invalid role, choose 'candidate' or 'employer'",
            ));
        }

        let status = match reg.role {
            Role::Employer => AccountStatus::Pending,
            _ => AccountStatus::Active,
        };

        Ok(User {
            id: UserId::new(),
            name: normalize_name(&reg.name)?,
            email: normalize_email(&reg.email)?,
            password_hash: Some(reg.password_hash),
            role: reg.role,
            permissions: CapabilitySet::new(),
            status,
            approved_by: None,
            created_by: None,
            created_at: now,
        })
    }

    /// First sign-in through an external identity provider. No stored
    /// credential; defaults to an active candidate.
    pub fn federated(name: &str, email: &str, now: DateTime<Utc>) -> DomainResult<User> {
        Ok(User {
            id: UserId::new(),
            name: normalize_name(name)?,
            email: normalize_email(email)?,
            password_hash: None,
            role: Role::Candidate,
            permissions: CapabilitySet::new(),
            status: AccountStatus::Active,
            approved_by: None,
            created_by: None,
            created_at: now,
        })
    }

    /// A delegated sub-administrator with a capability set, created by the
    /// superadmin.
    pub fn subadmin(
        name: &str,
        email: &str,
        password_hash: String,
        permissions: CapabilitySet,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<User> {
        Ok(User {
            id: UserId::new(),
            name: normalize_name(name)?,
            email: normalize_email(email)?,
            password_hash: Some(password_hash),
            role: Role::Subadmin,
            permissions,
            status: AccountStatus::Active,
            approved_by: None,
            created_by: Some(created_by),
            created_at: now,
        })
    }

    /// The seeded superadmin; run once at startup when none exists.
    pub fn seed_superadmin(
        name: &str,
        email: &str,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> DomainResult<User> {
        Ok(User {
            id: UserId::new(),
            name: normalize_name(name)?,
            email: normalize_email(email)?,
            password_hash: Some(password_hash),
            role: Role::Superadmin,
            permissions: CapabilitySet::new(),
            status: AccountStatus::Active,
            approved_by: None,
            created_by: None,
            created_at: now,
        })
    }

    // ── Lifecycle transitions ────────────────────────────────────────────

    /// `{pending, blocked} → active` (also a no-op on an already-active
    /// account; the action is idempotent).
    pub fn activate(&mut self) {
        self.status = AccountStatus::Active;
    }

    /// `{pending, active} → blocked`. Always fails against a superadmin.
    pub fn block(&mut self) -> DomainResult<()> {
        if self.role == Role::Superadmin {
            return Err(DomainError::forbidden("cannot block super admin"));
        }
        self.status = AccountStatus::Blocked;
        Ok(())
    }

    /// Employer approval: activate plus an approver stamp.
    pub fn approve(&mut self, approver: UserId) {
        self.activate();
        self.approved_by = Some(approver);
    }

    /// Employer rejection: sugar over `block`.
    pub fn reject(&mut self) -> DomainResult<()> {
        self.block()
    }

    /// Replace the capability set. Only subadmins carry one.
    pub fn set_permissions(&mut self, permissions: CapabilitySet) -> DomainResult<()> {
        if self.role != Role::Subadmin {
            return Err(DomainError::invalid_input(
                "permissions can only be assigned to subadmins",
            ));
        }
        self.permissions = permissions;
        Ok(())
    }

    // ── Guards ───────────────────────────────────────────────────────────

    /// Fails closed before any authorization is evaluated.
    pub fn ensure_not_blocked(&self) -> DomainResult<()> {
        if self.status == AccountStatus::Blocked {
            return Err(DomainError::AccountBlocked);
        }
        Ok(())
    }

    /// Gate for actions that require a moderated, active account.
    pub fn ensure_active(&self) -> DomainResult<()> {
        if self.status != AccountStatus::Active {
            return Err(DomainError::AccountNotActive);
        }
        Ok(())
    }
}
