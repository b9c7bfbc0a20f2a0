use axum::{routing::get, Router};

pub mod admin;
pub mod auth;
pub mod blog;
pub mod candidate;
pub mod employer;
pub mod jobs;
pub mod system;

/// Routes reachable without a bearer token. `GET /api/auth/me` and comment
/// creation live here because their siblings are public; they authenticate
/// inside the handler.
pub fn public_router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .nest("/api/auth", auth::router())
        .nest("/api/jobs", jobs::router())
        .route("/api/blog", get(blog::list_posts))
        .route("/api/blog/:slug", get(blog::get_post))
        .route(
            "/api/blog/:slug/comments",
            get(blog::list_comments).post(blog::create_comment),
        )
}

/// Routes behind the authentication middleware.
pub fn protected_router() -> Router {
    Router::new()
        .nest("/api/admin", admin::router())
        .nest("/api/employer", employer::router())
        .nest("/api/candidate", candidate::router())
}
