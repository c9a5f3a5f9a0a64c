// src/services/comment_moderation_types.rs
//
// Request and view types for the comment moderation service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Comment, CommentId, CommentStatus, Post, PostId, User, UserId};
use crate::repositories::CommentRecord;

/// Reply to an existing comment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub post_id: PostId,
    pub parent_id: CommentId,
    pub body: String,
}

/// Author fields shown on the moderation screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub user_name: String,
    pub display_name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            display_name: user.display_name,
        }
    }
}

/// Comment fields shown on the moderation screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentSummary {
    pub id: CommentId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentSummary {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            parent_id: comment.parent_id,
            content: comment.content,
            status: comment.status,
            created_at: comment.created_at,
        }
    }
}

/// One row of the moderation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub user: UserSummary,
    pub comment: CommentSummary,
    pub post: Post,
}

impl From<CommentRecord> for CommentView {
    fn from(record: CommentRecord) -> Self {
        Self {
            user: record.author.into(),
            comment: record.comment.into(),
            post: record.post,
        }
    }
}

/// All comments, partitioned by moderation status
///
/// Recomputed on every request; each bucket keeps fetch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDashboard {
    pub all_comments: Vec<CommentView>,
    pub number_of_comments: usize,
    pub approved_comments: Vec<CommentView>,
    pub number_of_approved_comments: usize,
    pub pending_comments: Vec<CommentView>,
    pub number_of_pending_comments: usize,
    pub spam_comments: Vec<CommentView>,
    pub number_of_spam_comments: usize,
    pub deleted_comments: Vec<CommentView>,
    pub number_of_deleted_comments: usize,
}

impl CommentDashboard {
    pub fn from_views(views: Vec<CommentView>) -> Self {
        let approved = Self::with_status(&views, CommentStatus::Approved);
        let pending = Self::with_status(&views, CommentStatus::Pending);
        let spam = Self::with_status(&views, CommentStatus::Spam);
        let deleted = Self::with_status(&views, CommentStatus::Trash);

        Self {
            number_of_comments: views.len(),
            all_comments: views,
            number_of_approved_comments: approved.len(),
            approved_comments: approved,
            number_of_pending_comments: pending.len(),
            pending_comments: pending,
            number_of_spam_comments: spam.len(),
            spam_comments: spam,
            number_of_deleted_comments: deleted.len(),
            deleted_comments: deleted,
        }
    }

    fn with_status(views: &[CommentView], status: CommentStatus) -> Vec<CommentView> {
        views
            .iter()
            .filter(|v| v.comment.status == status)
            .cloned()
            .collect()
    }

    /// The bucket holding `status`
    pub fn bucket(&self, status: CommentStatus) -> &[CommentView] {
        match status {
            CommentStatus::Approved => &self.approved_comments,
            CommentStatus::Pending => &self.pending_comments,
            CommentStatus::Spam => &self.spam_comments,
            CommentStatus::Trash => &self.deleted_comments,
        }
    }

    pub fn count(&self, status: CommentStatus) -> usize {
        self.bucket(status).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(id: i64, status: CommentStatus) -> CommentView {
        let now = Utc::now();
        CommentView {
            user: UserSummary {
                id: UserId(1),
                user_name: "u".to_string(),
                display_name: "U".to_string(),
            },
            comment: CommentSummary {
                id: CommentId(id),
                parent_id: None,
                content: format!("comment {}", id),
                status,
                created_at: now,
            },
            post: Post {
                id: PostId(1),
                title: "p".to_string(),
                created_at: now,
            },
        }
    }

    fn ids(views: &[CommentView]) -> Vec<i64> {
        views.iter().map(|v| v.comment.id.0).collect()
    }

    #[test]
    fn test_partitions_preserve_order_and_counts() {
        use CommentStatus::*;
        let statuses = [Pending, Approved, Spam, Pending, Trash, Approved, Pending];
        let views = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| view(i as i64 + 1, *s))
            .collect();

        let dashboard = CommentDashboard::from_views(views);

        assert_eq!(dashboard.number_of_comments, 7);
        assert_eq!(ids(&dashboard.approved_comments), vec![2, 6]);
        assert_eq!(ids(&dashboard.pending_comments), vec![1, 4, 7]);
        assert_eq!(ids(&dashboard.spam_comments), vec![3]);
        assert_eq!(ids(&dashboard.deleted_comments), vec![5]);

        let bucket_total: usize = CommentStatus::ALL.iter().map(|s| dashboard.count(*s)).sum();
        assert_eq!(bucket_total, dashboard.number_of_comments);
        assert_eq!(dashboard.number_of_pending_comments, 3);
        assert_eq!(dashboard.number_of_deleted_comments, 1);
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = CommentDashboard::from_views(Vec::new());
        assert_eq!(dashboard.number_of_comments, 0);
        for status in CommentStatus::ALL {
            assert!(dashboard.bucket(status).is_empty());
        }
    }
}
