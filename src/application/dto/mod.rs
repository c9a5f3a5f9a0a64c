// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Statuses travel as lowercase strings

use serde::{Deserialize, Serialize};

use crate::application::error_handling::ErrorResponse;
use crate::services::{CommentDashboard, CommentView};

// ============================================================================
// COMMENT DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentViewDto {
    pub comment_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub status: String,
    pub created_at: String,
    pub author_id: i64,
    pub author_user_name: String,
    pub author_display_name: String,
    pub post_id: i64,
    pub post_title: String,
}

impl From<CommentView> for CommentViewDto {
    fn from(view: CommentView) -> Self {
        Self {
            comment_id: view.comment.id.0,
            parent_id: view.comment.parent_id.map(|p| p.0),
            content: view.comment.content,
            status: view.comment.status.to_string(),
            created_at: view.comment.created_at.to_rfc3339(),
            author_id: view.user.id.0,
            author_user_name: view.user.user_name,
            author_display_name: view.user.display_name,
            post_id: view.post.id.0,
            post_title: view.post.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDashboardDto {
    pub all_comments: Vec<CommentViewDto>,
    pub number_of_comments: usize,
    pub approved_comments: Vec<CommentViewDto>,
    pub number_of_approved_comments: usize,
    pub pending_comments: Vec<CommentViewDto>,
    pub number_of_pending_comments: usize,
    pub spam_comments: Vec<CommentViewDto>,
    pub number_of_spam_comments: usize,
    pub deleted_comments: Vec<CommentViewDto>,
    pub number_of_deleted_comments: usize,
}

fn to_dtos(views: Vec<CommentView>) -> Vec<CommentViewDto> {
    views.into_iter().map(CommentViewDto::from).collect()
}

impl From<CommentDashboard> for CommentDashboardDto {
    fn from(dashboard: CommentDashboard) -> Self {
        Self {
            all_comments: to_dtos(dashboard.all_comments),
            number_of_comments: dashboard.number_of_comments,
            approved_comments: to_dtos(dashboard.approved_comments),
            number_of_approved_comments: dashboard.number_of_approved_comments,
            pending_comments: to_dtos(dashboard.pending_comments),
            number_of_pending_comments: dashboard.number_of_pending_comments,
            spam_comments: to_dtos(dashboard.spam_comments),
            number_of_spam_comments: dashboard.number_of_spam_comments,
            deleted_comments: to_dtos(dashboard.deleted_comments),
            number_of_deleted_comments: dashboard.number_of_deleted_comments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyCommentDto {
    pub post_id: i64,
    pub parent_id: i64,
    pub comment_body: String,
}

// ============================================================================
// RESPONSE DTOs
// ============================================================================

/// Outcome of a write command
///
/// `success` is the whole contract for simple callers; `error` explains a
/// failure for callers that want to know why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub comment_id: Option<i64>,
    pub error: Option<ErrorResponse>,
}

impl ActionResponse {
    pub fn ok(comment_id: i64) -> Self {
        Self {
            success: true,
            comment_id: Some(comment_id),
            error: None,
        }
    }

    pub fn failed(error: ErrorResponse) -> Self {
        Self {
            success: false,
            comment_id: None,
            error: Some(error),
        }
    }
}
