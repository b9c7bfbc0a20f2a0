//! Bearer-token authentication and identity resolution.
//!
//! Order is load-bearing: token validation, then account lookup, then the
//! blocked-account check, and only afterwards (in the handlers) any role or
//! capability evaluation. A blocked account is locked out of everything even
//! while it still holds a valid token.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use jobnexus_auth::Principal;
use jobnexus_board::User;
use jobnexus_core::{DomainError, DomainResult};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// The live account document of the caller, resolved per request.
///
/// Role and id always come from here; the capability set used in
/// authorization comes from the token snapshot (the [`Principal`]
/// extension), not from this document.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Resolve the caller identity from the `Authorization` header.
///
/// Also called directly by the one authenticated handler that lives on the
/// public tree (comment creation).
pub async fn authenticate(
    services: &AppServices,
    headers: &HeaderMap,
) -> Result<(CurrentUser, Principal), ApiError> {
    let token = extract_bearer(headers)?;
    let claims = services.tokens.validate(token)?;

    let user = services
        .store
        .user_by_id(claims.sub)
        .await?
        .ok_or_else(|| DomainError::unauthorized("account no longer exists"))?;
    user.ensure_not_blocked()?;

    Ok((CurrentUser(user), Principal::from(&claims)))
}

pub async fn auth_middleware(
    State(services): State<Arc<AppServices>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let (user, principal) = authenticate(&services, req.headers()).await?;

    req.extensions_mut().insert(principal);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> DomainResult<&str> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| DomainError::unauthorized("missing bearer token"))?;

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DomainError::unauthorized("missing bearer token"))?;

    Ok(token)
}
