use std::sync::Arc;

use jobnexus_api::app::services::AppServices;
use jobnexus_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    jobnexus_observability::init();

    let config = Config::from_env();
    let services = Arc::new(AppServices::from_config(&config));

    jobnexus_api::bootstrap::ensure_seed_admin(services.store.as_ref(), &config).await?;

    let app = jobnexus_api::app::build_app(
        Arc::clone(&services),
        jobnexus_api::app::cors_layer(&config.cors_origins),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
