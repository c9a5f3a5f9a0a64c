use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::post::PostId;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Database identity of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderation state of a comment
///
/// Any status may be replaced by any other; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    Approved,
    Pending,
    Spam,
    Trash,
}

impl CommentStatus {
    /// Every status, in dashboard order
    pub const ALL: [CommentStatus; 4] = [
        CommentStatus::Approved,
        CommentStatus::Pending,
        CommentStatus::Spam,
        CommentStatus::Trash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Approved => "approved",
            CommentStatus::Pending => "pending",
            CommentStatus::Spam => "spam",
            CommentStatus::Trash => "trash",
        }
    }
}

impl std::fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(CommentStatus::Approved),
            "pending" => Ok(CommentStatus::Pending),
            "spam" => Ok(CommentStatus::Spam),
            "trash" | "deleted" => Ok(CommentStatus::Trash),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown comment status: {}",
                other
            ))),
        }
    }
}

/// A persisted comment on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,

    /// Comment this one answers, if threaded
    pub parent_id: Option<CommentId>,

    pub post_id: PostId,

    /// Author
    pub user_id: UserId,

    pub content: String,

    pub status: CommentStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Overwrite the moderation status and touch the update timestamp
    pub fn set_status(&mut self, status: CommentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// A comment that has not been inserted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub parent_id: Option<CommentId>,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    /// Build a reply; replies always start out pending
    pub fn reply(post_id: PostId, parent_id: CommentId, user_id: UserId, content: String) -> Self {
        Self {
            parent_id: Some(parent_id),
            post_id,
            user_id,
            content,
            status: CommentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn into_comment(self, id: CommentId) -> Comment {
        Comment {
            id,
            parent_id: self.parent_id,
            post_id: self.post_id,
            user_id: self.user_id,
            content: self.content,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_round_trips_display() {
        for status in CommentStatus::ALL {
            assert_eq!(status.to_string().parse::<CommentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("SPAM".parse::<CommentStatus>().unwrap(), CommentStatus::Spam);
        assert_eq!(" Trash ".parse::<CommentStatus>().unwrap(), CommentStatus::Trash);
    }

    #[test]
    fn test_deleted_is_trash() {
        assert_eq!("deleted".parse::<CommentStatus>().unwrap(), CommentStatus::Trash);
        assert_eq!("Deleted".parse::<CommentStatus>().unwrap(), CommentStatus::Trash);
    }

    #[test]
    fn test_unknown_status_fails() {
        assert!("hidden".parse::<CommentStatus>().is_err());
    }

    #[test]
    fn test_reply_starts_pending() {
        let reply = NewComment::reply(PostId(1), CommentId(2), UserId(3), "thanks".to_string());
        assert_eq!(reply.status, CommentStatus::Pending);
        assert_eq!(reply.parent_id, Some(CommentId(2)));
    }
}
