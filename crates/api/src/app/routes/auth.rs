//! Registration, login, federated sign-in, password reset, and `/me`.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use jobnexus_auth::{hash_password, validate_new_password, verify_password, ResetToken, Role};
use jobnexus_board::{NewRegistration, User};
use jobnexus_core::DomainError;

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::middleware::{self, CurrentUser};

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/google", post(google_sign_in))
        .route("/password-reset/request", post(request_password_reset))
        .route("/password-reset/confirm", post(confirm_password_reset))
        .route("/me", get(me))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> ApiResult<Response> {
    let role: Role = body.role.parse()?;
    validate_new_password(&body.password)?;
    let password_hash = hash_password(&body.password)?;

    let user = User::register(
        NewRegistration {
            name: body.name,
            email: body.email,
            password_hash,
            role,
        },
        Utc::now(),
    )?;
    services.store.insert_user(user.clone()).await?;

    let message = match role {
        Role::Employer => "registration successful, your account is pending approval",
        _ => "registration successful",
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": message, "user": dto::user_to_json(&user) })),
    )
        .into_response())
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> ApiResult<Response> {
    let email = body.email.trim().to_lowercase();

    // One uniform rejection for unknown email, federated-only account, and
    // wrong password.
    let bad_credentials = || DomainError::unauthorized("invalid email or password");

    let user = services
        .store
        .user_by_email(&email)
        .await?
        .ok_or_else(bad_credentials)?;
    let stored_hash = user.password_hash.as_deref().ok_or_else(bad_credentials)?;
    if !verify_password(&body.password, stored_hash) {
        return Err(bad_credentials().into());
    }

    user.ensure_not_blocked()?;

    let token = services
        .tokens
        .issue(user.id, user.role, user.permissions.iter().copied())?;

    Ok(Json(json!({ "token": token, "user": dto::user_to_json(&user) })).into_response())
}

pub async fn google_sign_in(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::GoogleSignInRequest>,
) -> ApiResult<Response> {
    let identity = services.verifier.verify(&body.id_token).await?;
    let email = identity.email.trim().to_lowercase();

    let user = match services.store.user_by_email(&email).await? {
        Some(user) => user,
        None => {
            let user = User::federated(&identity.name, &identity.email, Utc::now())?;
            match services.store.insert_user(user.clone()).await {
                Ok(()) => user,
                // Lost a first-sign-in race; the account now exists.
                Err(DomainError::Conflict(_)) => services
                    .store
                    .user_by_email(&email)
                    .await?
                    .ok_or_else(|| DomainError::unavailable("account lookup failed"))?,
                Err(e) => return Err(e.into()),
            }
        }
    };

    user.ensure_not_blocked()?;

    let token = services
        .tokens
        .issue(user.id, user.role, user.permissions.iter().copied())?;

    Ok(Json(json!({ "token": token, "user": dto::user_to_json(&user) })).into_response())
}

pub async fn request_password_reset(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ResetRequest>,
) -> ApiResult<Response> {
    let email = body.email.trim().to_lowercase();

    if let Some(user) = services.store.user_by_email(&email).await? {
        let (secret, token) = ResetToken::issue(user.id, Utc::now());
        services.store.insert_reset_token(token).await?;

        // Delivery is best-effort; a transport failure must not change the
        // response, or it would leak which addresses exist.
        if let Err(e) = services.mailer.send_password_reset(&email, &secret).await {
            tracing::warn!(error = %e, "failed to send password reset mail");
        }
    }

    Ok(Json(json!({
        "message": "if the email exists, a reset link has been sent"
    }))
    .into_response())
}

pub async fn confirm_password_reset(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ResetConfirmRequest>,
) -> ApiResult<Response> {
    validate_new_password(&body.new_password)?;

    let token_hash = jobnexus_auth::hash_reset_secret(&body.token);
    let user_id = services
        .store
        .redeem_reset_token(&token_hash, Utc::now())
        .await?
        .ok_or(DomainError::InvalidOrExpiredToken)?;

    let mut user = services
        .store
        .user_by_id(user_id)
        .await?
        .ok_or(DomainError::InvalidOrExpiredToken)?;
    user.password_hash = Some(hash_password(&body.new_password)?);
    services.store.update_user(&user).await?;

    Ok(Json(json!({ "message": "password has been reset" })).into_response())
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let (CurrentUser(user), _) = middleware::authenticate(&services, &headers).await?;

    let profile = match user.role {
        Role::Employer => services
            .store
            .employer_profile(user.id)
            .await?
            .map(|p| json!(p)),
        Role::Candidate => services
            .store
            .candidate_profile(user.id)
            .await?
            .map(|p| json!(p)),
        _ => None,
    };

    Ok(Json(json!({
        "user": dto::user_to_json(&user),
        "profile": profile,
    }))
    .into_response())
}
