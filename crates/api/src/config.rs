//! Runtime configuration gathered from the environment.

use jobnexus_auth::token::DEFAULT_TOKEN_TTL_HOURS;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub bind_addr: String,
    /// Comma-separated origin list, or `*` for any.
    pub cors_origins: String,
    pub token_ttl_hours: i64,
    pub seed_admin_email: String,
    pub seed_admin_password: String,
    /// Google sign-in stays disabled when unset.
    pub google_client_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        Self {
            jwt_secret,
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8080"),
            cors_origins: env_or("CORS_ORIGINS", "*"),
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            seed_admin_email: env_or("SEED_ADMIN_EMAIL", "admin@jobnexus.local"),
            seed_admin_password: env_or("SEED_ADMIN_PASSWORD", "changeme-admin"),
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").ok(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
