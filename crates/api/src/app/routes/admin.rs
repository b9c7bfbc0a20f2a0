//! Moderation and administration surface.
//!
//! Sub-admin management is reserved for the superadmin; everything else is
//! capability-gated, which the superadmin satisfies unconditionally. The
//! capability set evaluated here is the caller's token snapshot.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use jobnexus_auth::{
    authorize, capability::parse_capabilities, hash_password, validate_new_password, Capability,
    Principal, Requirement, Role,
};
use jobnexus_board::{AccountStatus, JobStatus, User};
use jobnexus_content::{BlogPost, CommentStatus, PostDraft, PostEdit};
use jobnexus_core::{CommentId, DomainError, JobId, PostId, UserId};
use jobnexus_infra::{JobQuery, PostQuery, UserFilter};

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/subadmins", post(create_subadmin).get(list_subadmins))
        .route("/subadmins/:id", put(update_subadmin).delete(remove_subadmin))
        .route("/users", get(list_users))
        .route("/users/:id/block", put(block_user))
        .route("/users/:id/activate", put(activate_user))
        .route("/employers/pending", get(pending_employers))
        .route("/employers/:id/approve", put(approve_employer))
        .route("/employers/:id/reject", put(reject_employer))
        .route("/jobs", get(list_jobs))
        .route("/jobs/pending", get(pending_jobs))
        .route("/jobs/:id", delete(remove_job))
        .route("/jobs/:id/approve", put(approve_job))
        .route("/jobs/:id/reject", put(reject_job))
        .route("/analytics", get(analytics))
        .route("/blog", post(create_post).get(list_posts))
        .route("/blog/:id", put(update_post).delete(remove_post))
        .route("/blog/:id/approve", put(approve_post))
        .route("/blog/comments", get(comment_queue))
        .route("/blog/comments/:id/approve", put(approve_comment))
        .route("/blog/comments/:id/reject", put(reject_comment))
}

fn require_superadmin(principal: &Principal) -> Result<(), DomainError> {
    authorize(principal, Requirement::AnyRole(&[Role::Superadmin]))
}

fn require(principal: &Principal, cap: Capability) -> Result<(), DomainError> {
    authorize(principal, Requirement::Capability(cap))
}

// ── Sub-admin management (superadmin only) ──────────────────────────────

pub async fn create_subadmin(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateSubadminRequest>,
) -> ApiResult<Response> {
    require_superadmin(&principal)?;

    let permissions = parse_capabilities(&body.permissions)?;
    validate_new_password(&body.password)?;
    let password_hash = hash_password(&body.password)?;

    let user = User::subadmin(
        &body.name,
        &body.email,
        password_hash,
        permissions,
        principal.id,
        Utc::now(),
    )?;
    services.store.insert_user(user.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": dto::user_to_json(&user) })),
    )
        .into_response())
}

pub async fn list_subadmins(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Response> {
    require_superadmin(&principal)?;

    let users = services
        .store
        .list_users(&UserFilter {
            role: Some(Role::Subadmin),
            ..UserFilter::default()
        })
        .await?;

    Ok(Json(json!({
        "items": users.iter().map(dto::user_to_json).collect::<Vec<_>>()
    }))
    .into_response())
}

pub async fn update_subadmin(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateSubadminRequest>,
) -> ApiResult<Response> {
    require_superadmin(&principal)?;

    let permissions = parse_capabilities(&body.permissions)?;

    let id: UserId = id.parse()?;
    let mut user = services
        .store
        .user_by_id(id)
        .await?
        .filter(|u| u.role == Role::Subadmin)
        .ok_or_else(|| DomainError::not_found("subadmin not found"))?;

    user.set_permissions(permissions)?;
    services.store.update_user(&user).await?;

    Ok(Json(json!({ "user": dto::user_to_json(&user) })).into_response())
}

pub async fn remove_subadmin(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_superadmin(&principal)?;

    let id: UserId = id.parse()?;
    if !services.store.delete_subadmin(id).await? {
        return Err(DomainError::not_found("subadmin not found").into());
    }

    Ok(Json(json!({ "message": "subadmin deleted" })).into_response())
}

// ── User moderation (MANAGE_USERS) ──────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
    pub status: Option<String>,
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<UserListParams>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageUsers)?;

    let role: Option<Role> = params.role.as_deref().map(str::parse).transpose()?;
    let status: Option<AccountStatus> = params.status.as_deref().map(str::parse).transpose()?;

    let users = services
        .store
        .list_users(&UserFilter {
            role,
            status,
            exclude_superadmin: true,
        })
        .await?;

    Ok(Json(json!({
        "items": users.iter().map(dto::user_to_json).collect::<Vec<_>>()
    }))
    .into_response())
}

pub async fn block_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageUsers)?;

    let mut user = user_or_404(&services, &id).await?;
    user.block()?;
    services.store.update_user(&user).await?;

    Ok(Json(json!({ "user": dto::user_to_json(&user) })).into_response())
}

pub async fn activate_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageUsers)?;

    let mut user = user_or_404(&services, &id).await?;
    user.activate();
    services.store.update_user(&user).await?;

    Ok(Json(json!({ "user": dto::user_to_json(&user) })).into_response())
}

// ── Employer approval (APPROVE_EMPLOYERS) ───────────────────────────────

pub async fn pending_employers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Response> {
    require(&principal, Capability::ApproveEmployers)?;

    let users = services
        .store
        .list_users(&UserFilter {
            role: Some(Role::Employer),
            status: Some(AccountStatus::Pending),
            exclude_superadmin: true,
        })
        .await?;

    Ok(Json(json!({
        "items": users.iter().map(dto::user_to_json).collect::<Vec<_>>()
    }))
    .into_response())
}

pub async fn approve_employer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ApproveEmployers)?;

    let mut employer = employer_or_404(&services, &id).await?;
    employer.approve(principal.id);
    services.store.update_user(&employer).await?;

    Ok(Json(json!({ "user": dto::user_to_json(&employer) })).into_response())
}

pub async fn reject_employer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ApproveEmployers)?;

    let mut employer = employer_or_404(&services, &id).await?;
    employer.reject()?;
    services.store.update_user(&employer).await?;

    Ok(Json(json!({ "user": dto::user_to_json(&employer) })).into_response())
}

// ── Job moderation (MANAGE_JOBS) ────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobListParams {
    pub status: Option<String>,
}

pub async fn list_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<JobListParams>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageJobs)?;

    let status: Option<JobStatus> = params.status.as_deref().map(str::parse).transpose()?;
    let jobs = services
        .store
        .list_jobs(&JobQuery {
            status,
            ..JobQuery::default()
        })
        .await?;

    Ok(Json(json!({ "items": jobs })).into_response())
}

pub async fn pending_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageJobs)?;

    let jobs = services
        .store
        .list_jobs(&JobQuery {
            status: Some(JobStatus::Pending),
            ..JobQuery::default()
        })
        .await?;

    Ok(Json(json!({ "items": jobs })).into_response())
}

pub async fn approve_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageJobs)?;

    let mut job = job_or_404(&services, &id).await?;
    job.approve(principal.id);
    services.store.update_job(&job).await?;

    Ok(Json(json!({ "job": job })).into_response())
}

pub async fn reject_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageJobs)?;

    let mut job = job_or_404(&services, &id).await?;
    job.reject();
    services.store.update_job(&job).await?;

    Ok(Json(json!({ "job": job })).into_response())
}

pub async fn remove_job(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageJobs)?;

    let id: JobId = id.parse()?;
    if !services.store.delete_job(id).await? {
        return Err(DomainError::not_found("job not found").into());
    }

    Ok(Json(json!({ "message": "job deleted" })).into_response())
}

// ── Analytics (VIEW_REPORTS) ────────────────────────────────────────────

pub async fn analytics(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Response> {
    require(&principal, Capability::ViewReports)?;

    let store = &services.store;
    let by_role = |role| UserFilter {
        role: Some(role),
        ..UserFilter::default()
    };
    let by_status = |status| JobQuery {
        status: Some(status),
        ..JobQuery::default()
    };

    Ok(Json(json!({
        "users": {
            "employers": store.count_users(&by_role(Role::Employer)).await?,
            "candidates": store.count_users(&by_role(Role::Candidate)).await?,
            "subadmins": store.count_users(&by_role(Role::Subadmin)).await?,
            "pending_employers": store.count_users(&UserFilter {
                role: Some(Role::Employer),
                status: Some(AccountStatus::Pending),
                exclude_superadmin: false,
            }).await?,
        },
        "jobs": {
            "total": store.count_jobs(&JobQuery::default()).await?,
            "pending": store.count_jobs(&by_status(JobStatus::Pending)).await?,
            "approved": store.count_jobs(&by_status(JobStatus::Approved)).await?,
            "rejected": store.count_jobs(&by_status(JobStatus::Rejected)).await?,
        },
        "applications": {
            "total": store.count_applications().await?,
        },
    }))
    .into_response())
}

// ── Blog administration (MANAGE_BLOG; approve is superadmin-only) ───────

pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(draft): Json<PostDraft>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageBlog)?;

    let post = BlogPost::create(draft, principal.id, Utc::now())?;
    // The store may suffix the slug to keep it unique.
    let post = services.store.insert_post(post).await?;

    Ok((StatusCode::CREATED, Json(json!({ "post": post }))).into_response())
}

pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageBlog)?;

    let posts = services.store.list_posts(&PostQuery::default()).await?;
    Ok(Json(json!({ "items": posts })).into_response())
}

pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(edit): Json<PostEdit>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageBlog)?;

    let id: PostId = id.parse()?;
    let mut post = services
        .store
        .post_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("post not found"))?;

    post.apply_edit(edit, Utc::now());
    services.store.update_post(&post).await?;

    Ok(Json(json!({ "post": post })).into_response())
}

pub async fn remove_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageBlog)?;

    let id: PostId = id.parse()?;
    if !services.store.delete_post(id).await? {
        return Err(DomainError::not_found("post not found").into());
    }

    Ok(Json(json!({ "message": "post deleted" })).into_response())
}

pub async fn approve_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_superadmin(&principal)?;

    let id: PostId = id.parse()?;
    let mut post = services
        .store
        .post_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("post not found"))?;

    post.approve(Utc::now());
    services.store.update_post(&post).await?;

    Ok(Json(json!({ "post": post })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct CommentQueueParams {
    pub status: Option<String>,
}

pub async fn comment_queue(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<CommentQueueParams>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageBlog)?;

    let status: Option<CommentStatus> = params.status.as_deref().map(str::parse).transpose()?;
    let comments = services.store.list_comments(status).await?;

    Ok(Json(json!({ "items": comments })).into_response())
}

pub async fn approve_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageBlog)?;

    let mut comment = comment_or_404(&services, &id).await?;
    comment.approve();
    services.store.update_comment(&comment).await?;

    Ok(Json(json!({ "comment": comment })).into_response())
}

pub async fn reject_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require(&principal, Capability::ManageBlog)?;

    let mut comment = comment_or_404(&services, &id).await?;
    comment.reject();
    services.store.update_comment(&comment).await?;

    Ok(Json(json!({ "comment": comment })).into_response())
}

// ── Lookup helpers ──────────────────────────────────────────────────────

async fn user_or_404(services: &AppServices, id: &str) -> Result<User, DomainError> {
    let id: UserId = id.parse()?;
    services
        .store
        .user_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("user not found"))
}

async fn employer_or_404(services: &AppServices, id: &str) -> Result<User, DomainError> {
    let id: UserId = id.parse()?;
    services
        .store
        .user_by_id(id)
        .await?
        .filter(|u| u.role == Role::Employer)
        .ok_or_else(|| DomainError::not_found("employer not found"))
}

async fn job_or_404(
    services: &AppServices,
    id: &str,
) -> Result<jobnexus_board::Job, DomainError> {
    let id: JobId = id.parse()?;
    services
        .store
        .job_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("job not found"))
}

async fn comment_or_404(
    services: &AppServices,
    id: &str,
) -> Result<jobnexus_content::Comment, DomainError> {
    let id: CommentId = id.parse()?;
    services
        .store
        .comment_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("comment not found"))
}
