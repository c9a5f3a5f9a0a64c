use super::entity::NewComment;
use crate::domain::{DomainError, DomainResult};

/// Validates a comment before it is inserted
///
/// Content is stored exactly as supplied, so only the thread linkage is
/// checked here.
pub fn validate_comment(comment: &NewComment) -> DomainResult<()> {
    if comment.parent_id.is_some_and(|p| p.0 <= 0) {
        return Err(DomainError::InvariantViolation(
            "Parent comment id must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that hold for every Comment:
///
/// 1. Exactly one moderation status at all times
/// 2. Status may move between any two values
/// 3. A reply points at a positive parent id
/// 4. Comments are never hard-deleted here; Trash is a status
