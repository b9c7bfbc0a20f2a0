//! Error-to-HTTP mapping.
//!
//! Every handler failure leaves the service as the same JSON envelope:
//! `{ "error": <stable code>, "message": <human text> }`.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use jobnexus_core::DomainError;

/// Wrapper so handlers can use `?` on `DomainResult` values.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_)
            | DomainError::AccountBlocked
            | DomainError::AccountNotActive => StatusCode::FORBIDDEN,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::InvalidInput(_) | DomainError::InvalidOrExpiredToken => {
                StatusCode::BAD_REQUEST
            }
            DomainError::Unavailable(msg) => {
                tracing::error!(error = %msg, "request failed on a collaborator");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        json_error(status, self.0.code(), self.0.to_string())
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
