//! Job applications.
//!
//! At most one application exists per (job, candidate) pair; the uniqueness
//! itself is enforced atomically by the store. Only the employer owning the
//! referenced job may change an application's status, and only the owning
//! candidate may withdraw it — both checks happen in the API layer through
//! ownership-scoped lookups.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use jobnexus_core::{ApplicationId, DomainError, DomainResult, JobId, UserId};

use crate::job::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
        }
    }
}

impl core::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "hired" => Ok(ApplicationStatus::Hired),
            other => Err(DomainError::invalid_input(format!(
                "invalid status: {other}, valid: pending, reviewed, shortlisted, rejected, hired"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: UserId,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

impl Application {
    /// Apply to a job. The posting must be publicly available (approved);
    /// anything else reads as absent to the candidate.
    pub fn submit(
        job: &Job,
        candidate_id: UserId,
        cover_letter: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Application> {
        if !job.is_public() {
            return Err(DomainError::not_found("job not found or not available"));
        }

        Ok(Application {
            id: ApplicationId::new(),
            job_id: job.id,
            candidate_id,
            cover_letter,
            status: ApplicationStatus::Pending,
            created_at: now,
        })
    }

    pub fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
    }
}
