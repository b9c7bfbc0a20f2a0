//! Single-use, time-boxed password-reset secrets.
//!
//! Only the one-way hash of a secret is ever persisted; the plaintext goes
//! out-of-band to the account's email and is never stored or logged.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use jobnexus_core::UserId;
use serde::{Deserialize, Serialize};

/// Fixed redemption window from issuance.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 30;

/// Mint a fresh opaque secret (32 random bytes, hex-encoded).
pub fn generate_reset_secret() -> String {
    let mut buf = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

/// One-way digest used as the lookup key for a presented secret.
pub fn hash_reset_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

/// Persisted record of an issued reset secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetToken {
    pub token_hash: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
}

impl ResetToken {
    /// Issue a new secret for `user_id`, returning the plaintext (for the
    /// mailer) alongside the record to persist.
    pub fn issue(user_id: UserId, now: DateTime<Utc>) -> (String, ResetToken) {
        let secret = generate_reset_secret();
        let token = ResetToken {
            token_hash: hash_reset_secret(&secret),
            user_id,
            expires_at: now + Duration::minutes(RESET_TOKEN_TTL_MINUTES),
            used: false,
        };
        (secret, token)
    }

    /// A token is redeemable at most once and only before expiry.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}
