//! Service wiring shared by every handler.

use std::sync::Arc;

use async_trait::async_trait;

use jobnexus_auth::TokenService;
use jobnexus_core::{DomainError, DomainResult};
use jobnexus_infra::{InMemoryStore, LogMailer, Mailer, Store};

use crate::config::Config;

/// Everything the handlers reach for, behind one `Arc` extension.
pub struct AppServices {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    pub mailer: Arc<dyn Mailer>,
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppServices {
    pub fn from_config(config: &Config) -> Self {
        let verifier: Arc<dyn IdentityVerifier> = match &config.google_client_id {
            Some(client_id) => Arc::new(GoogleVerifier::new(client_id.clone())),
            None => Arc::new(SignInDisabled),
        };

        Self {
            store: Arc::new(InMemoryStore::new()),
            tokens: TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl_hours),
            mailer: Arc::new(LogMailer),
            verifier,
        }
    }
}

/// Identity asserted by an external provider after token verification.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: String,
}

/// Federated sign-in collaborator.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> DomainResult<VerifiedIdentity>;
}

/// Verifies Google ID tokens against the tokeninfo endpoint.
pub struct GoogleVerifier {
    client: reqwest::Client,
    client_id: String,
}

impl GoogleVerifier {
    pub fn new(client_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> DomainResult<VerifiedIdentity> {
        let response = self
            .client
            .get("https://oauth2.googleapis.com/tokeninfo")
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| DomainError::unavailable(format!("token verification failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::unauthorized("invalid google token"));
        }

        let info: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::unavailable(format!("token verification failed: {e}")))?;

        if info["aud"].as_str() != Some(self.client_id.as_str()) {
            return Err(DomainError::unauthorized("invalid google token"));
        }

        let email = info["email"]
            .as_str()
            .ok_or_else(|| DomainError::unauthorized("invalid google token"))?
            .to_string();
        let name = info["name"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| email.clone());

        Ok(VerifiedIdentity { email, name })
    }
}

/// Placeholder used when no Google client id is configured.
pub struct SignInDisabled;

#[async_trait]
impl IdentityVerifier for SignInDisabled {
    async fn verify(&self, _id_token: &str) -> DomainResult<VerifiedIdentity> {
        Err(DomainError::unavailable("google sign-in is not configured"))
    }
}
