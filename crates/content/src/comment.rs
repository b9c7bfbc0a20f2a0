//! Blog comments, mirroring job moderation: created pending, publicly
//! visible only after an explicit moderator approval.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use jobnexus_core::{CommentId, DomainError, DomainResult, PostId, UserId};

use crate::post::BlogPost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for CommentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CommentStatus::Pending),
            "approved" => Ok(CommentStatus::Approved),
            "rejected" => Ok(CommentStatus::Rejected),
            other => Err(DomainError::invalid_input(format!("invalid status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub body: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Comment on a post. The post must be publicly visible and accepting
    /// comments.
    pub fn create(
        post: &BlogPost,
        author_id: UserId,
        body: String,
        now: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        if !post.is_visible(now) {
            return Err(DomainError::not_found("post not found"));
        }
        if !post.comments_enabled {
            return Err(DomainError::forbidden("comments are disabled for this post"));
        }

        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(DomainError::invalid_input("comment cannot be empty"));
        }

        Ok(Comment {
            id: CommentId::new(),
            post_id: post.id,
            author_id,
            body,
            status: CommentStatus::Pending,
            created_at: now,
        })
    }

    pub fn approve(&mut self) {
        self.status = CommentStatus::Approved;
    }

    pub fn reject(&mut self) {
        self.status = CommentStatus::Rejected;
    }

    pub fn is_visible(&self) -> bool {
        self.status == CommentStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{BlogPost, PostDraft, PostStatus};

    fn published_post(comments_enabled: bool) -> BlogPost {
        BlogPost::create(
            PostDraft {
                title: "Welcome".into(),
                body: "First post.".into(),
                status: Some(PostStatus::Published),
                published_at: None,
                categories: vec![],
                tags: vec![],
                comments_enabled,
            },
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn comment_starts_pending_and_hidden() {
        let post = published_post(true);
        let comment =
            Comment::create(&post, UserId::new(), "Nice!".into(), Utc::now()).unwrap();
        assert_eq!(comment.status, CommentStatus::Pending);
        assert!(!comment.is_visible());
    }

    #[test]
    fn disabled_comments_rejected() {
        let post = published_post(false);
        let err = Comment::create(&post, UserId::new(), "Nice!".into(), Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::forbidden("comments are disabled for this post"));
    }

    #[test]
    fn unpublished_post_reads_as_absent() {
        let mut post = published_post(true);
        post.status = PostStatus::Draft;
        let err = Comment::create(&post, UserId::new(), "Nice!".into(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn approve_makes_visible() {
        let post = published_post(true);
        let mut comment =
            Comment::create(&post, UserId::new(), "Nice!".into(), Utc::now()).unwrap();

        comment.approve();
        assert!(comment.is_visible());

        comment.reject();
        assert!(!comment.is_visible());
    }
}
