//! Salted password hashing (bcrypt).

use jobnexus_core::{DomainError, DomainResult};

/// Minimum accepted password length, applied at registration, subadmin
/// creation, and reset confirmation.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_new_password(password: &str) -> DomainResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(DomainError::invalid_input(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| DomainError::unavailable(format!("password hashing failed: {e}")))
}

/// Constant-time verification against a stored hash. A malformed stored hash
/// counts as a mismatch rather than an error, so login stays uniform.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
