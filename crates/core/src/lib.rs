//! `jobnexus-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers and the error taxonomy shared by every layer.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ApplicationId, CommentId, JobId, PostId, UserId};
