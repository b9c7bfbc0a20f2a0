//! Public blog reads plus authenticated comment creation.
//!
//! A post that is not published-and-due reads as absent, never as
//! forbidden, so drafts and scheduled posts cannot be probed for.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use jobnexus_content::{BlogPost, Comment, CommentStatus, PostStatus};
use jobnexus_core::{DomainError, DomainResult};
use jobnexus_infra::PostQuery;

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::middleware::{self, CurrentUser};

pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
) -> ApiResult<Response> {
    let posts = services
        .store
        .list_posts(&PostQuery {
            status: Some(PostStatus::Published),
            visible_at: Some(Utc::now()),
        })
        .await?;

    Ok(Json(json!({ "items": posts })).into_response())
}

pub async fn get_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> ApiResult<Response> {
    let post = visible_post(&services, &slug).await?;
    Ok(Json(json!(post)).into_response())
}

pub async fn list_comments(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> ApiResult<Response> {
    let post = visible_post(&services, &slug).await?;
    let comments = services
        .store
        .comments_for_post(post.id, Some(CommentStatus::Approved))
        .await?;

    Ok(Json(json!({ "items": comments })).into_response())
}

pub async fn create_comment(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(body): Json<dto::CommentRequest>,
) -> ApiResult<Response> {
    let (CurrentUser(user), _) = middleware::authenticate(&services, &headers).await?;

    let post = visible_post(&services, &slug).await?;
    let comment = Comment::create(&post, user.id, body.body, Utc::now())?;
    services.store.insert_comment(comment.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "comment submitted and awaiting moderation",
            "comment": comment,
        })),
    )
        .into_response())
}

async fn visible_post(services: &AppServices, slug: &str) -> DomainResult<BlogPost> {
    services
        .store
        .post_by_slug(slug)
        .await?
        .filter(|p| p.is_visible(Utc::now()))
        .ok_or_else(|| DomainError::not_found("post not found"))
}
