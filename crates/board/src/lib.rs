//! `jobnexus-board` — account, job, and application lifecycles.
//!
//! Pure domain: entities and their state machines. Persistence and HTTP
//! mapping live elsewhere.

pub mod account;
pub mod application;
pub mod job;
pub mod profile;

pub use account::{AccountStatus, NewRegistration, User};
pub use application::{Application, ApplicationStatus};
pub use job::{Job, JobDraft, JobEdit, JobStatus};
pub use profile::{CandidateProfile, EmployerProfile};
