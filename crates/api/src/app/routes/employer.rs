//! Employer-facing operations, all scoped to the caller's own postings.
//!
//! Lookups are ownership-scoped: another employer's job or application reads
//! as absent, not forbidden.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use jobnexus_auth::{authorize, Principal, Requirement, Role};
use jobnexus_board::{ApplicationStatus, EmployerProfile, Job, JobDraft, JobEdit};
use jobnexus_core::{ApplicationId, DomainError, JobId};
use jobnexus_infra::JobQuery;

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::middleware::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/profile", get(get_profile).put(put_profile))
        .route("/jobs", axum::routing::post(create_job).get(list_jobs))
        .route("/jobs/:id", put(update_job).delete(delete_job))
        .route("/jobs/:id/applicants", get(list_applicants))
        .route("/applications/:id/status", put(set_application_status))
}

fn require_employer(principal: &Principal) -> Result<(), DomainError> {
    authorize(principal, Requirement::AnyRole(&[Role::Employer]))
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Response> {
    require_employer(&principal)?;
    let profile = services.store.employer_profile(user.id).await?;
    Ok(Json(json!({ "profile": profile })).into_response())
}

pub async fn put_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<dto::EmployerProfileRequest>,
) -> ApiResult<Response> {
    require_employer(&principal)?;

    let profile = EmployerProfile {
        user_id: user.id,
        company_name: body.company_name,
        company_description: body.company_description,
        company_website: body.company_website,
        company_location: body.company_location,
        company_size: body.company_size,
        company_logo: body.company_logo,
    };
    services.store.upsert_employer_profile(profile.clone()).await?;

    Ok(Json(json!({ "profile": profile })).into_response())
}

pub async fn create_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(draft): Json<JobDraft>,
) -> ApiResult<Response> {
    require_employer(&principal)?;

    // Rejects with AccountNotActive while the employer is still pending.
    let job = Job::post(&user, draft, Utc::now())?;
    services.store.insert_job(job.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "job submitted and awaiting moderation",
            "job": job,
        })),
    )
        .into_response())
}

pub async fn list_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Response> {
    require_employer(&principal)?;

    let jobs = services
        .store
        .list_jobs(&JobQuery {
            employer_id: Some(user.id),
            ..JobQuery::default()
        })
        .await?;

    Ok(Json(json!({ "items": jobs })).into_response())
}

pub async fn update_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(edit): Json<JobEdit>,
) -> ApiResult<Response> {
    require_employer(&principal)?;

    let mut job = owned_job(&services, &user.id, &id).await?;
    if job.apply_edit(edit) {
        services.store.update_job(&job).await?;
    }

    Ok(Json(json!({
        "message": "job updated and awaiting re-approval",
        "job": job,
    }))
    .into_response())
}

pub async fn delete_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_employer(&principal)?;

    let job = owned_job(&services, &user.id, &id).await?;
    services.store.delete_job(job.id).await?;

    Ok(Json(json!({ "message": "job deleted" })).into_response())
}

pub async fn list_applicants(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_employer(&principal)?;

    let job = owned_job(&services, &user.id, &id).await?;
    let applications = services.store.applications_for_job(job.id).await?;

    let mut items = Vec::with_capacity(applications.len());
    for application in applications {
        let candidate = services.store.user_by_id(application.candidate_id).await?;
        items.push(json!({
            "application": application,
            "candidate": candidate.map(|c| json!({
                "id": c.id.to_string(),
                "name": c.name,
                "email": c.email,
            })),
        }));
    }

    Ok(Json(json!({ "items": items })).into_response())
}

pub async fn set_application_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<dto::StatusRequest>,
) -> ApiResult<Response> {
    require_employer(&principal)?;

    let status: ApplicationStatus = body.status.parse()?;

    let id: ApplicationId = id.parse()?;
    let mut application = services
        .store
        .application_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("application not found"))?;

    // Only the employer owning the referenced job may touch it.
    let owns = services
        .store
        .job_by_id(application.job_id)
        .await?
        .is_some_and(|j| j.employer_id == user.id);
    if !owns {
        return Err(DomainError::not_found("application not found").into());
    }

    application.set_status(status);
    services.store.update_application(&application).await?;

    Ok(Json(json!({ "application": application })).into_response())
}

async fn owned_job(
    services: &AppServices,
    employer_id: &jobnexus_core::UserId,
    id: &str,
) -> Result<Job, DomainError> {
    let id: JobId = id.parse()?;
    services
        .store
        .job_by_id(id)
        .await?
        .filter(|j| &j.employer_id == employer_id)
        .ok_or_else(|| DomainError::not_found("job not found"))
}
