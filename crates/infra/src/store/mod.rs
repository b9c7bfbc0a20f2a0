//! Document-store collaborator contract.
//!
//! Collection-oriented CRUD with equality/substring filters. The contract
//! bakes in the three cross-request invariants that must hold under
//! concurrency: unique (email), unique (job_id, candidate_id), unique
//! (slug, broken with a numeric suffix), and atomic single-redemption of
//! reset secrets. Implementations enforce these inside their own atomicity
//! domain, never as read-then-write in the caller.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use jobnexus_auth::{ResetToken, Role};
use jobnexus_board::{
    AccountStatus, Application, CandidateProfile, EmployerProfile, Job, JobStatus, User,
};
use jobnexus_content::{BlogPost, Comment, CommentStatus, PostStatus};
use jobnexus_core::{ApplicationId, CommentId, DomainResult, JobId, PostId, UserId};

/// Equality filter over the users collection.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
    /// Admin listings never expose the superadmin.
    pub exclude_superadmin: bool,
}

/// Filter over the jobs collection. `search` and `location` are matched as
/// case-insensitive substrings (patterns are never interpreted).
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    pub status: Option<JobStatus>,
    pub employer_id: Option<UserId>,
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub limit: Option<usize>,
}

/// Filter over the blog posts collection.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    /// When set, only posts that are published AND due at this instant.
    pub visible_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the email is already taken, atomically
    /// even under concurrent registration with the same address.
    async fn insert_user(&self, user: User) -> DomainResult<()>;
    async fn user_by_id(&self, id: UserId) -> DomainResult<Option<User>>;
    async fn user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    /// Replaces the stored document; `NotFound` when absent.
    async fn update_user(&self, user: &User) -> DomainResult<()>;
    /// Deletes only if the account exists *and* is a subadmin.
    async fn delete_subadmin(&self, id: UserId) -> DomainResult<bool>;
    async fn superadmin_exists(&self) -> DomainResult<bool>;
    async fn list_users(&self, filter: &UserFilter) -> DomainResult<Vec<User>>;
    async fn count_users(&self, filter: &UserFilter) -> DomainResult<u64>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn upsert_employer_profile(&self, profile: EmployerProfile) -> DomainResult<()>;
    async fn employer_profile(&self, user_id: UserId) -> DomainResult<Option<EmployerProfile>>;
    async fn upsert_candidate_profile(&self, profile: CandidateProfile) -> DomainResult<()>;
    async fn candidate_profile(&self, user_id: UserId) -> DomainResult<Option<CandidateProfile>>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert_job(&self, job: Job) -> DomainResult<()>;
    async fn job_by_id(&self, id: JobId) -> DomainResult<Option<Job>>;
    async fn update_job(&self, job: &Job) -> DomainResult<()>;
    async fn delete_job(&self, id: JobId) -> DomainResult<bool>;
    async fn list_jobs(&self, query: &JobQuery) -> DomainResult<Vec<Job>>;
    async fn count_jobs(&self, query: &JobQuery) -> DomainResult<u64>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Fails with `Conflict` when an application for the same
    /// (job, candidate) pair already exists.
    async fn insert_application(&self, application: Application) -> DomainResult<()>;
    async fn application_by_id(&self, id: ApplicationId) -> DomainResult<Option<Application>>;
    async fn update_application(&self, application: &Application) -> DomainResult<()>;
    async fn delete_application(&self, id: ApplicationId) -> DomainResult<bool>;
    async fn applications_for_job(&self, job_id: JobId) -> DomainResult<Vec<Application>>;
    async fn applications_for_candidate(&self, candidate_id: UserId)
        -> DomainResult<Vec<Application>>;
    async fn count_applications(&self) -> DomainResult<u64>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts the post, breaking slug collisions with a numeric suffix
    /// (`slug`, `slug-2`, `slug-3`, ...). Returns the stored document.
    async fn insert_post(&self, post: BlogPost) -> DomainResult<BlogPost>;
    async fn post_by_id(&self, id: PostId) -> DomainResult<Option<BlogPost>>;
    async fn post_by_slug(&self, slug: &str) -> DomainResult<Option<BlogPost>>;
    async fn update_post(&self, post: &BlogPost) -> DomainResult<()>;
    async fn delete_post(&self, id: PostId) -> DomainResult<bool>;
    async fn list_posts(&self, query: &PostQuery) -> DomainResult<Vec<BlogPost>>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert_comment(&self, comment: Comment) -> DomainResult<()>;
    async fn comment_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>>;
    async fn update_comment(&self, comment: &Comment) -> DomainResult<()>;
    async fn comments_for_post(
        &self,
        post_id: PostId,
        status: Option<CommentStatus>,
    ) -> DomainResult<Vec<Comment>>;
    /// Moderation queue across all posts.
    async fn list_comments(&self, status: Option<CommentStatus>) -> DomainResult<Vec<Comment>>;
}

#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    async fn insert_reset_token(&self, token: ResetToken) -> DomainResult<()>;
    /// Atomic "mark used if redeemable": returns the owning user exactly
    /// once per secret; `None` when absent, already used, or expired.
    async fn redeem_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<UserId>>;
}

/// The full store collaborator the API layer is wired against.
pub trait Store:
    UserStore
    + ProfileStore
    + JobStore
    + ApplicationStore
    + PostStore
    + CommentStore
    + ResetTokenStore
{
}

impl<T> Store for T where
    T: UserStore
        + ProfileStore
        + JobStore
        + ApplicationStore
        + PostStore
        + CommentStore
        + ResetTokenStore
{
}
