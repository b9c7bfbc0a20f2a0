//! `jobnexus-content` — blog publication and comment moderation.

pub mod comment;
pub mod post;
pub mod slug;

pub use comment::{Comment, CommentStatus};
pub use post::{BlogPost, PostDraft, PostEdit, PostStatus};
pub use slug::slugify;
