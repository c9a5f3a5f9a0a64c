//! Comment moderation invariants live in `invariants`.

pub mod entity;
pub mod invariants;

pub use entity::{Comment, CommentId, CommentStatus, NewComment};
pub use invariants::validate_comment;
