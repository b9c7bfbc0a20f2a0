//! Candidate-facing operations.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use jobnexus_auth::{authorize, Principal, Requirement, Role};
use jobnexus_board::{Application, CandidateProfile};
use jobnexus_core::{ApplicationId, DomainError, JobId};

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::middleware::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/profile", get(get_profile).put(put_profile))
        .route("/applications", post(apply).get(list_applications))
        .route("/applications/:id", delete(withdraw))
}

fn require_candidate(principal: &Principal) -> Result<(), DomainError> {
    authorize(principal, Requirement::AnyRole(&[Role::Candidate]))
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Response> {
    require_candidate(&principal)?;
    let profile = services.store.candidate_profile(user.id).await?;
    Ok(Json(json!({ "profile": profile })).into_response())
}

pub async fn put_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<dto::CandidateProfileRequest>,
) -> ApiResult<Response> {
    require_candidate(&principal)?;

    let profile = CandidateProfile {
        user_id: user.id,
        headline: body.headline,
        summary: body.summary,
        skills: body.skills,
        experience: body.experience,
        education: body.education,
        resume_url: body.resume_url,
        phone: body.phone,
        location: body.location,
    };
    services.store.upsert_candidate_profile(profile.clone()).await?;

    Ok(Json(json!({ "profile": profile })).into_response())
}

pub async fn apply(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<dto::ApplyRequest>,
) -> ApiResult<Response> {
    require_candidate(&principal)?;

    let job_id: JobId = body.job_id.parse()?;
    let job = services
        .store
        .job_by_id(job_id)
        .await?
        .ok_or_else(|| DomainError::not_found("job not found or not available"))?;

    // An unapproved job reads as absent here as well.
    let application = Application::submit(&job, user.id, body.cover_letter, Utc::now())?;
    services.store.insert_application(application.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "application": application })),
    )
        .into_response())
}

pub async fn list_applications(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Response> {
    require_candidate(&principal)?;

    let applications = services.store.applications_for_candidate(user.id).await?;

    let mut items = Vec::with_capacity(applications.len());
    for application in applications {
        let job = services.store.job_by_id(application.job_id).await?;
        items.push(json!({
            "application": application,
            "job": job.map(|j| json!({
                "id": j.id.to_string(),
                "title": j.title,
                "company": j.company,
                "status": j.status.as_str(),
            })),
        }));
    }

    Ok(Json(json!({ "items": items })).into_response())
}

pub async fn withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_candidate(&principal)?;

    let id: ApplicationId = id.parse()?;
    let application = services
        .store
        .application_by_id(id)
        .await?
        .filter(|a| a.candidate_id == user.id)
        .ok_or_else(|| DomainError::not_found("application not found"))?;

    services.store.delete_application(application.id).await?;

    Ok(Json(json!({ "message": "application withdrawn" })).into_response())
}
