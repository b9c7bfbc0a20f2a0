//! Startup seeding.

use chrono::Utc;

use jobnexus_board::User;
use jobnexus_core::DomainError;
use jobnexus_infra::{Store, UserStore};

use crate::config::Config;

/// Create the superadmin account if none exists yet. Safe to run on every
/// startup; a concurrent seed racing us loses on the email uniqueness
/// constraint and that loss is treated as success.
pub async fn ensure_seed_admin(store: &dyn Store, config: &Config) -> anyhow::Result<()> {
    if store.superadmin_exists().await? {
        return Ok(());
    }

    let password_hash = jobnexus_auth::hash_password(&config.seed_admin_password)?;
    let admin = User::seed_superadmin(
        "Super Admin",
        &config.seed_admin_email,
        password_hash,
        Utc::now(),
    )?;

    match store.insert_user(admin).await {
        Ok(()) => {
            tracing::info!(email = %config.seed_admin_email, "seeded superadmin account");
            Ok(())
        }
        Err(DomainError::Conflict(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
