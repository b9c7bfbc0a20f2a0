//! Signed, time-limited identity tokens (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use jobnexus_core::{DomainError, DomainResult, UserId};

use crate::{Capability, Claims, Role};

/// Default token lifetime when none is configured.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Issues and validates bearer tokens with a server-held secret.
///
/// There is no server-side revocation list: a compromised token stays valid
/// until its expiry. Callers that need a shorter staleness window should
/// configure a shorter lifetime rather than expect per-request re-checks.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Mint a token for `user_id` carrying the role and the capability
    /// snapshot as of now.
    pub fn issue(
        &self,
        user_id: UserId,
        role: Role,
        permissions: impl IntoIterator<Item = Capability>,
    ) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            permissions: permissions.into_iter().collect(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| DomainError::unavailable(format!("token signing failed: {e}")))
    }

    /// Verify signature and expiry, yielding the embedded claims.
    pub fn validate(&self, token: &str) -> DomainResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(DomainError::unauthorized("token has expired"))
            }
            Err(_) => Err(DomainError::unauthorized("invalid token")),
        }
    }
}
