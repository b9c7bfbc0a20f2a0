//! Public job browsing. Only approved postings exist from out here.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use jobnexus_board::JobStatus;
use jobnexus_core::{DomainError, JobId};
use jobnexus_infra::JobQuery;

use crate::app::errors::ApiResult;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_jobs))
        .route("/:id", get(get_job))
}

/// Filters are matched as case-insensitive substrings, never as patterns.
#[derive(Debug, Deserialize)]
pub struct JobListParams {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub limit: Option<usize>,
}

pub async fn list_jobs(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<JobListParams>,
) -> ApiResult<Response> {
    let jobs = services
        .store
        .list_jobs(&JobQuery {
            status: Some(JobStatus::Approved),
            employer_id: None,
            search: params.search,
            location: params.location,
            job_type: params.job_type,
            limit: params.limit,
        })
        .await?;

    let total = jobs.len();
    Ok(Json(json!({ "items": jobs, "total": total })).into_response())
}

pub async fn get_job(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id: JobId = id.parse()?;
    let job = services
        .store
        .job_by_id(id)
        .await?
        .filter(|j| j.is_public())
        .ok_or_else(|| DomainError::not_found("job not found"))?;

    Ok(Json(json!(job)).into_response())
}
