//! `jobnexus-infra` — collaborator contracts and reference implementations.
//!
//! The document store and the outbound mailer are consumed by the rest of
//! the system only through the narrow traits defined here. The in-memory
//! store doubles as the test fixture and the default runtime backend;
//! swapping in a real document database means implementing the same traits
//! over its client.

pub mod mailer;
pub mod store;

pub use mailer::{LogMailer, MailError, Mailer};
pub use store::{
    memory::InMemoryStore, ApplicationStore, CommentStore, JobQuery, JobStore, PostQuery,
    PostStore, ProfileStore, ResetTokenStore, Store, UserFilter, UserStore,
};
