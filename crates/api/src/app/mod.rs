//! HTTP application wiring (router assembly + shared layers).
//!
//! - `services.rs`: store/token/mailer/verifier wiring
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request bodies and JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{Extension, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// integration tests).
pub fn build_app(services: Arc<services::AppServices>, cors: CorsLayer) -> Router {
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        Arc::clone(&services),
        middleware::auth_middleware,
    ));

    Router::new()
        .merge(routes::public_router())
        .merge(protected)
        .layer(Extension(services))
        .layer(cors)
}

/// CORS policy from the configured origin list (`*` allows any origin).
pub fn cors_layer(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.trim() == "*" {
        layer.allow_origin(Any)
    } else {
        let list: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|o| o.trim().parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(list))
    }
}
