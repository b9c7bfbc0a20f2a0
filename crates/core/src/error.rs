//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every business-rule failure is recovered into one of these kinds before it
/// crosses the API boundary; each kind has a stable HTTP status assigned by
/// the API layer. Infrastructure failures on critical paths surface as
/// `Unavailable` rather than silently succeeding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing, malformed, or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (role/permission mismatch, or a
    /// disallowed transition such as blocking a superadmin).
    #[error("{0}")]
    Forbidden(String),

    /// Entity absent, or filtered out by an ownership-scoped lookup.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation (duplicate email, application, slug).
    #[error("{0}")]
    Conflict(String),

    /// A value failed validation (bad enum value, bad capability name,
    /// password too short).
    #[error("{0}")]
    InvalidInput(String),

    /// The caller's account is blocked; checked before any role evaluation.
    #[error("account is blocked")]
    AccountBlocked,

    /// The caller's account has not been approved yet.
    #[error("account is pending approval")]
    AccountNotActive,

    /// Password-reset secret is absent, already used, or past expiry.
    #[error("invalid or expired reset token")]
    InvalidOrExpiredToken,

    /// A collaborator (store, mailer) failed on a critical path.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl DomainError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Stable machine-readable code for the API error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::InvalidInput(_) => "invalid_input",
            Self::AccountBlocked => "account_blocked",
            Self::AccountNotActive => "account_not_active",
            Self::InvalidOrExpiredToken => "invalid_or_expired_token",
            Self::Unavailable(_) => "unavailable",
        }
    }
}
