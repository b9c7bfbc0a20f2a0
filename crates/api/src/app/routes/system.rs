use axum::{http::StatusCode, Json};
use serde_json::json;

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "service": "jobnexus-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
