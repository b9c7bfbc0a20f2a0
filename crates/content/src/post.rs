//! Blog posts and the publication state machine.
//!
//! A post is publicly visible iff its status is `published` AND its publish
//! timestamp has passed — future-dated scheduled posts already read
//! `published` but stay hidden until the instant arrives.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use jobnexus_core::{DomainError, DomainResult, PostId, UserId};

use crate::slug::slugify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    PendingReview,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::PendingReview => "pending_review",
            PostStatus::Published => "published",
        }
    }
}

impl core::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "pending_review" => Ok(PostStatus::PendingReview),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::invalid_input(format!("invalid status: {other}"))),
        }
    }
}

/// Content of a new post. Status is caller-specified, defaulting to draft.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub status: Option<PostStatus>,
    /// Scheduled publish instant; honored only when entering `published`.
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_comments_enabled")]
    pub comments_enabled: bool,
}

fn default_comments_enabled() -> bool {
    true
}

/// Edit; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostEdit {
    pub title: Option<String>,
    pub body: Option<String>,
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub comments_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: PostId,
    /// Unique; collisions are broken by the store with a numeric suffix.
    pub slug: String,
    pub title: String,
    pub body: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: UserId,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub comments_enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn create(draft: PostDraft, author_id: UserId, now: DateTime<Utc>) -> DomainResult<BlogPost> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::invalid_input("title cannot be empty"));
        }

        let status = draft.status.unwrap_or(PostStatus::Draft);
        let published_at = match status {
            PostStatus::Published => Some(draft.published_at.unwrap_or(now)),
            _ => draft.published_at,
        };

        Ok(BlogPost {
            id: PostId::new(),
            slug: slugify(&title),
            title,
            body: draft.body,
            status,
            published_at,
            author_id,
            categories: draft.categories,
            tags: draft.tags,
            comments_enabled: draft.comments_enabled,
            created_at: now,
        })
    }

    /// Apply an edit. Moving into `published` fills the publish timestamp
    /// (caller-supplied value, else now) only when none exists yet — an
    /// already-scheduled timestamp is never regressed.
    pub fn apply_edit(&mut self, edit: PostEdit, now: DateTime<Utc>) {
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(body) = edit.body {
            self.body = body;
        }
        if let Some(categories) = edit.categories {
            self.categories = categories;
        }
        if let Some(tags) = edit.tags {
            self.tags = tags;
        }
        if let Some(enabled) = edit.comments_enabled {
            self.comments_enabled = enabled;
        }

        if let Some(status) = edit.status {
            self.status = status;
        }
        if self.status == PostStatus::Published && self.published_at.is_none() {
            self.published_at = Some(edit.published_at.unwrap_or(now));
        }
    }

    /// Superadmin-only force-publish, filling the timestamp if absent.
    pub fn approve(&mut self, now: DateTime<Utc>) {
        self.status = PostStatus::Published;
        self.published_at.get_or_insert(now);
    }

    /// Publicly visible iff published and due.
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Published
            && self.published_at.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft(status: Option<PostStatus>, published_at: Option<DateTime<Utc>>) -> PostDraft {
        PostDraft {
            title: "Hiring in 2026".into(),
            body: "Some advice.".into(),
            status,
            published_at,
            categories: vec!["hiring".into()],
            tags: vec![],
            comments_enabled: true,
        }
    }

    #[test]
    fn defaults_to_draft() {
        let post = BlogPost::create(draft(None, None), UserId::new(), Utc::now()).unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.slug, "hiring-in-2026");
        assert!(!post.is_visible(Utc::now()));
    }

    #[test]
    fn publishing_without_timestamp_uses_now() {
        let now = Utc::now();
        let post =
            BlogPost::create(draft(Some(PostStatus::Published), None), UserId::new(), now).unwrap();
        assert_eq!(post.published_at, Some(now));
        assert!(post.is_visible(now));
    }

    #[test]
    fn future_dated_post_hidden_until_due() {
        let now = Utc::now();
        let later = now + Duration::hours(1);
        let post = BlogPost::create(
            draft(Some(PostStatus::Published), Some(later)),
            UserId::new(),
            now,
        )
        .unwrap();

        assert_eq!(post.status, PostStatus::Published);
        assert!(!post.is_visible(now));
        assert!(!post.is_visible(later - Duration::seconds(1)));
        assert!(post.is_visible(later));
        assert!(post.is_visible(later + Duration::days(1)));
    }

    #[test]
    fn edit_never_regresses_a_scheduled_timestamp() {
        let now = Utc::now();
        let scheduled = now + Duration::hours(1);
        let mut post = BlogPost::create(
            draft(Some(PostStatus::Published), Some(scheduled)),
            UserId::new(),
            now,
        )
        .unwrap();

        post.apply_edit(
            PostEdit {
                body: Some("Updated advice.".into()),
                published_at: Some(now + Duration::days(7)),
                ..PostEdit::default()
            },
            now,
        );

        assert_eq!(post.published_at, Some(scheduled));
        assert_eq!(post.body, "Updated advice.");
    }

    #[test]
    fn edit_into_published_fills_timestamp_once() {
        let now = Utc::now();
        let mut post = BlogPost::create(draft(None, None), UserId::new(), now).unwrap();

        post.apply_edit(
            PostEdit {
                status: Some(PostStatus::Published),
                ..PostEdit::default()
            },
            now,
        );
        assert_eq!(post.published_at, Some(now));

        // A later edit keeps the original instant.
        post.apply_edit(
            PostEdit {
                title: Some("Hiring in 2027".into()),
                ..PostEdit::default()
            },
            now + Duration::days(1),
        );
        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn approve_force_publishes() {
        let now = Utc::now();
        let mut post =
            BlogPost::create(draft(Some(PostStatus::PendingReview), None), UserId::new(), now)
                .unwrap();

        post.approve(now);
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, Some(now));

        // Approving again keeps the original instant.
        post.approve(now + Duration::hours(2));
        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn empty_title_rejected() {
        let mut d = draft(None, None);
        d.title = "   ".into();
        assert!(BlogPost::create(d, UserId::new(), Utc::now()).is_err());
    }
}
