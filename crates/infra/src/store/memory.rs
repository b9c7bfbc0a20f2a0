//! In-memory document store.
//!
//! One coarse mutex over all collections: every contract-level invariant
//! (unique email, unique (job, candidate), slug suffixing, single
//! redemption) is checked and applied under the same lock acquisition,
//! which is what makes the conditional writes atomic.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use jobnexus_auth::ResetToken;
use jobnexus_board::{Application, CandidateProfile, EmployerProfile, Job, User};
use jobnexus_content::{BlogPost, Comment, CommentStatus};
use jobnexus_core::{
    ApplicationId, CommentId, DomainError, DomainResult, JobId, PostId, UserId,
};

use super::{
    ApplicationStore, CommentStore, JobQuery, JobStore, PostQuery, PostStore, ProfileStore,
    ResetTokenStore, UserFilter, UserStore,
};
use jobnexus_auth::Role;

#[derive(Default)]
struct Collections {
    users: HashMap<UserId, User>,
    employer_profiles: HashMap<UserId, EmployerProfile>,
    candidate_profiles: HashMap<UserId, CandidateProfile>,
    jobs: HashMap<JobId, Job>,
    applications: HashMap<ApplicationId, Application>,
    posts: HashMap<PostId, BlogPost>,
    comments: HashMap<CommentId, Comment>,
    reset_tokens: HashMap<String, ResetToken>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Collections> {
        // Lock poisoning only happens if another accessor panicked; the
        // collections are still structurally sound, so keep serving.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn user_matches(user: &User, filter: &UserFilter) -> bool {
    if filter.exclude_superadmin && user.role == Role::Superadmin {
        return false;
    }
    if filter.role.is_some_and(|r| user.role != r) {
        return false;
    }
    if filter.status.is_some_and(|s| user.status != s) {
        return false;
    }
    true
}

fn job_matches(job: &Job, query: &JobQuery) -> bool {
    if query.status.is_some_and(|s| job.status != s) {
        return false;
    }
    if query.employer_id.is_some_and(|e| job.employer_id != e) {
        return false;
    }
    if let Some(search) = &query.search {
        let hit = contains_ci(&job.title, search)
            || contains_ci(&job.company, search)
            || contains_ci(&job.description, search);
        if !hit {
            return false;
        }
    }
    if let Some(location) = &query.location {
        if !contains_ci(&job.location, location) {
            return false;
        }
    }
    if let Some(job_type) = &query.job_type {
        if &job.job_type != job_type {
            return false;
        }
    }
    true
}

fn post_matches(post: &BlogPost, query: &PostQuery) -> bool {
    if query.status.is_some_and(|s| post.status != s) {
        return false;
    }
    if let Some(now) = query.visible_at {
        if !post.is_visible(now) {
            return false;
        }
    }
    true
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: User) -> DomainResult<()> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("email already registered"));
        }
        inner.users.insert(user.id, user);
        Ok(())
    }

    async fn user_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self.lock().users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, user: &User) -> DomainResult<()> {
        let mut inner = self.lock();
        match inner.users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("user not found")),
        }
    }

    async fn delete_subadmin(&self, id: UserId) -> DomainResult<bool> {
        let mut inner = self.lock();
        let is_subadmin = inner
            .users
            .get(&id)
            .is_some_and(|u| u.role == Role::Subadmin);
        if is_subadmin {
            inner.users.remove(&id);
        }
        Ok(is_subadmin)
    }

    async fn superadmin_exists(&self) -> DomainResult<bool> {
        Ok(self
            .lock()
            .users
            .values()
            .any(|u| u.role == Role::Superadmin))
    }

    async fn list_users(&self, filter: &UserFilter) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self
            .lock()
            .users
            .values()
            .filter(|u| user_matches(u, filter))
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn count_users(&self, filter: &UserFilter) -> DomainResult<u64> {
        Ok(self
            .lock()
            .users
            .values()
            .filter(|u| user_matches(u, filter))
            .count() as u64)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn upsert_employer_profile(&self, profile: EmployerProfile) -> DomainResult<()> {
        self.lock().employer_profiles.insert(profile.user_id, profile);
        Ok(())
    }

    async fn employer_profile(&self, user_id: UserId) -> DomainResult<Option<EmployerProfile>> {
        Ok(self.lock().employer_profiles.get(&user_id).cloned())
    }

    async fn upsert_candidate_profile(&self, profile: CandidateProfile) -> DomainResult<()> {
        self.lock().candidate_profiles.insert(profile.user_id, profile);
        Ok(())
    }

    async fn candidate_profile(&self, user_id: UserId) -> DomainResult<Option<CandidateProfile>> {
        Ok(self.lock().candidate_profiles.get(&user_id).cloned())
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn insert_job(&self, job: Job) -> DomainResult<()> {
        self.lock().jobs.insert(job.id, job);
        Ok(())
    }

    async fn job_by_id(&self, id: JobId) -> DomainResult<Option<Job>> {
        Ok(self.lock().jobs.get(&id).cloned())
    }

    async fn update_job(&self, job: &Job) -> DomainResult<()> {
        let mut inner = self.lock();
        match inner.jobs.get_mut(&job.id) {
            Some(slot) => {
                *slot = job.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("job not found")),
        }
    }

    async fn delete_job(&self, id: JobId) -> DomainResult<bool> {
        Ok(self.lock().jobs.remove(&id).is_some())
    }

    async fn list_jobs(&self, query: &JobQuery) -> DomainResult<Vec<Job>> {
        let mut jobs: Vec<Job> = self
            .lock()
            .jobs
            .values()
            .filter(|j| job_matches(j, query))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            jobs.truncate(limit);
        }
        Ok(jobs)
    }

    async fn count_jobs(&self, query: &JobQuery) -> DomainResult<u64> {
        Ok(self
            .lock()
            .jobs
            .values()
            .filter(|j| job_matches(j, query))
            .count() as u64)
    }
}

#[async_trait]
impl ApplicationStore for InMemoryStore {
    async fn insert_application(&self, application: Application) -> DomainResult<()> {
        let mut inner = self.lock();
        let duplicate = inner.applications.values().any(|a| {
            a.job_id == application.job_id && a.candidate_id == application.candidate_id
        });
        if duplicate {
            return Err(DomainError::conflict("you have already applied for this job"));
        }
        inner.applications.insert(application.id, application);
        Ok(())
    }

    async fn application_by_id(&self, id: ApplicationId) -> DomainResult<Option<Application>> {
        Ok(self.lock().applications.get(&id).cloned())
    }

    async fn update_application(&self, application: &Application) -> DomainResult<()> {
        let mut inner = self.lock();
        match inner.applications.get_mut(&application.id) {
            Some(slot) => {
                *slot = application.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("application not found")),
        }
    }

    async fn delete_application(&self, id: ApplicationId) -> DomainResult<bool> {
        Ok(self.lock().applications.remove(&id).is_some())
    }

    async fn applications_for_job(&self, job_id: JobId) -> DomainResult<Vec<Application>> {
        let mut apps: Vec<Application> = self
            .lock()
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(apps)
    }

    async fn applications_for_candidate(
        &self,
        candidate_id: UserId,
    ) -> DomainResult<Vec<Application>> {
        let mut apps: Vec<Application> = self
            .lock()
            .applications
            .values()
            .filter(|a| a.candidate_id == candidate_id)
            .cloned()
            .collect();
        apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(apps)
    }

    async fn count_applications(&self) -> DomainResult<u64> {
        Ok(self.lock().applications.len() as u64)
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn insert_post(&self, mut post: BlogPost) -> DomainResult<BlogPost> {
        let mut inner = self.lock();

        let taken = |slug: &str, posts: &HashMap<PostId, BlogPost>| {
            posts.values().any(|p| p.slug == slug)
        };

        if taken(&post.slug, &inner.posts) {
            let base = post.slug.clone();
            let mut n = 2;
            while taken(&format!("{base}-{n}"), &inner.posts) {
                n += 1;
            }
            post.slug = format!("{base}-{n}");
        }

        inner.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn post_by_id(&self, id: PostId) -> DomainResult<Option<BlogPost>> {
        Ok(self.lock().posts.get(&id).cloned())
    }

    async fn post_by_slug(&self, slug: &str) -> DomainResult<Option<BlogPost>> {
        Ok(self.lock().posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn update_post(&self, post: &BlogPost) -> DomainResult<()> {
        let mut inner = self.lock();
        if inner
            .posts
            .values()
            .any(|p| p.id != post.id && p.slug == post.slug)
        {
            return Err(DomainError::conflict("slug already in use"));
        }
        match inner.posts.get_mut(&post.id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("post not found")),
        }
    }

    async fn delete_post(&self, id: PostId) -> DomainResult<bool> {
        let mut inner = self.lock();
        let removed = inner.posts.remove(&id).is_some();
        if removed {
            inner.comments.retain(|_, c| c.post_id != id);
        }
        Ok(removed)
    }

    async fn list_posts(&self, query: &PostQuery) -> DomainResult<Vec<BlogPost>> {
        let mut posts: Vec<BlogPost> = self
            .lock()
            .posts
            .values()
            .filter(|p| post_matches(p, query))
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.published_at
                .unwrap_or(b.created_at)
                .cmp(&a.published_at.unwrap_or(a.created_at))
        });
        Ok(posts)
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn insert_comment(&self, comment: Comment) -> DomainResult<()> {
        self.lock().comments.insert(comment.id, comment);
        Ok(())
    }

    async fn comment_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        Ok(self.lock().comments.get(&id).cloned())
    }

    async fn update_comment(&self, comment: &Comment) -> DomainResult<()> {
        let mut inner = self.lock();
        match inner.comments.get_mut(&comment.id) {
            Some(slot) => {
                *slot = comment.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("comment not found")),
        }
    }

    async fn comments_for_post(
        &self,
        post_id: PostId,
        status: Option<CommentStatus>,
    ) -> DomainResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .lock()
            .comments
            .values()
            .filter(|c| c.post_id == post_id && status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn list_comments(&self, status: Option<CommentStatus>) -> DomainResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .lock()
            .comments
            .values()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }
}

#[async_trait]
impl ResetTokenStore for InMemoryStore {
    async fn insert_reset_token(&self, token: ResetToken) -> DomainResult<()> {
        self.lock().reset_tokens.insert(token.token_hash.clone(), token);
        Ok(())
    }

    async fn redeem_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<UserId>> {
        let mut inner = self.lock();
        match inner.reset_tokens.get_mut(token_hash) {
            Some(token) if token.is_redeemable(now) => {
                token.used = true;
                Ok(Some(token.user_id))
            }
            _ => Ok(None),
        }
    }
}
