//! Outbound mail collaborator.
//!
//! Password reset delivery is best-effort: the caller treats a send failure
//! as non-fatal so the reset endpoint never leaks whether an address is
//! registered.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, to: &str, secret: &str) -> Result<(), MailError>;
}

/// Logs the reset secret instead of sending mail. Default backend for
/// development and tests.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, to: &str, secret: &str) -> Result<(), MailError> {
        tracing::info!(to, secret, "password reset requested");
        Ok(())
    }
}
