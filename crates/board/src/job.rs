//! Job postings and the moderation state machine.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use jobnexus_core::{DomainError, DomainResult, JobId, UserId};

use crate::account::User;

/// Moderation status of a posting.
///
/// Any state may move to any other via explicit approve/reject; only
/// `approved` postings are publicly visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Approved,
    Rejected,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Approved => "approved",
            JobStatus::Rejected => "rejected",
        }
    }
}

impl core::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "approved" => Ok(JobStatus::Approved),
            "rejected" => Ok(JobStatus::Rejected),
            other => Err(DomainError::invalid_input(format!("invalid status: {other}"))),
        }
    }
}

/// Content of a new posting.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    pub experience_level: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

fn default_job_type() -> String {
    "full-time".to_string()
}

/// Owner edit; every field optional. Any present field triggers re-review.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl JobEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.salary.is_none()
            && self.job_type.is_none()
            && self.experience_level.is_none()
            && self.skills.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub employer_id: UserId,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    pub job_type: String,
    pub experience_level: Option<String>,
    pub skills: Vec<String>,
    pub status: JobStatus,
    pub approved_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a posting for an employer. The employer must be active;
    /// a pending or blocked account is rejected before any record exists.
    pub fn post(employer: &User, draft: JobDraft, now: DateTime<Utc>) -> DomainResult<Job> {
        employer.ensure_active()?;

        Ok(Job {
            id: JobId::new(),
            employer_id: employer.id,
            title: draft.title,
            description: draft.description,
            company: draft.company,
            location: draft.location,
            salary: draft.salary,
            job_type: draft.job_type,
            experience_level: draft.experience_level,
            skills: draft.skills,
            status: JobStatus::Pending,
            approved_by: None,
            created_at: now,
        })
    }

    /// Moderator approval; stamps the approver. Valid from any state.
    pub fn approve(&mut self, moderator: UserId) {
        self.status = JobStatus::Approved;
        self.approved_by = Some(moderator);
    }

    /// Moderator rejection. Valid from any state.
    pub fn reject(&mut self) {
        self.status = JobStatus::Rejected;
        self.approved_by = None;
    }

    /// Owner content edit. Applying any non-empty edit unconditionally
    /// forces the posting back to `pending` and discards prior approval;
    /// an edit with no fields set changes nothing. Returns whether the
    /// posting changed.
    pub fn apply_edit(&mut self, edit: JobEdit) -> bool {
        if edit.is_empty() {
            return false;
        }

        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(location) = edit.location {
            self.location = location;
        }
        if let Some(salary) = edit.salary {
            self.salary = Some(salary);
        }
        if let Some(job_type) = edit.job_type {
            self.job_type = job_type;
        }
        if let Some(experience_level) = edit.experience_level {
            self.experience_level = Some(experience_level);
        }
        if let Some(skills) = edit.skills {
            self.skills = skills;
        }

        self.status = JobStatus::Pending;
        self.approved_by = None;
        true
    }

    /// Visible on public listing and detail endpoints.
    pub fn is_public(&self) -> bool {
        self.status == JobStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::NewRegistration;
    use jobnexus_auth::Role;

    fn active_employer() -> User {
        let mut employer = User::register(
            NewRegistration {
                name: "Acme HR".into(),
                email: "hr@acme.test".into(),
                password_hash: "$2b$fake".into(),
                role: Role::Employer,
            },
            Utc::now(),
        )
        .unwrap();
        employer.activate();
        employer
    }

    fn draft() -> JobDraft {
        JobDraft {
            title: "Backend Engineer".into(),
            description: "Build services".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            salary: None,
            job_type: "full-time".into(),
            experience_level: None,
            skills: vec!["rust".into()],
        }
    }

    #[test]
    fn pending_employer_cannot_post() {
        let employer = User::register(
            NewRegistration {
                name: "Acme HR".into(),
                email: "hr@acme.test".into(),
                password_hash: "$2b$fake".into(),
                role: Role::Employer,
            },
            Utc::now(),
        )
        .unwrap();

        let err = Job::post(&employer, draft(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::AccountNotActive));
    }

    #[test]
    fn new_posting_starts_pending() {
        let job = Job::post(&active_employer(), draft(), Utc::now()).unwrap();
        assert_eq!(job.status, JobStatus::Pending);
        assert!(!job.is_public());
    }

    #[test]
    fn approve_stamps_moderator() {
        let mut job = Job::post(&active_employer(), draft(), Utc::now()).unwrap();
        let moderator = UserId::new();

        job.approve(moderator);
        assert_eq!(job.status, JobStatus::Approved);
        assert_eq!(job.approved_by, Some(moderator));
        assert!(job.is_public());
    }

    #[test]
    fn any_state_reaches_any_other() {
        let mut job = Job::post(&active_employer(), draft(), Utc::now()).unwrap();
        let moderator = UserId::new();

        job.reject();
        assert_eq!(job.status, JobStatus::Rejected);

        job.approve(moderator);
        assert_eq!(job.status, JobStatus::Approved);

        job.reject();
        assert_eq!(job.status, JobStatus::Rejected);
        assert_eq!(job.approved_by, None);
    }

    #[test]
    fn owner_edit_resets_approval() {
        let mut job = Job::post(&active_employer(), draft(), Utc::now()).unwrap();
        job.approve(UserId::new());

        let changed = job.apply_edit(JobEdit {
            salary: Some("100k".into()),
            ..JobEdit::default()
        });

        assert!(changed);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.approved_by, None);
        assert_eq!(job.salary.as_deref(), Some("100k"));
    }

    #[test]
    fn noop_field_update_still_triggers_reset() {
        let mut job = Job::post(&active_employer(), draft(), Utc::now()).unwrap();
        job.approve(UserId::new());

        // Same title as before, but the field is present.
        let changed = job.apply_edit(JobEdit {
            title: Some("Backend Engineer".into()),
            ..JobEdit::default()
        });

        assert!(changed);
        assert_eq!(job.status, JobStatus::Pending);
    }

    #[test]
    fn empty_edit_changes_nothing() {
        let mut job = Job::post(&active_employer(), draft(), Utc::now()).unwrap();
        job.approve(UserId::new());

        assert!(!job.apply_edit(JobEdit::default()));
        assert_eq!(job.status, JobStatus::Approved);
    }
}
