// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod comment_moderation_service;
pub mod comment_moderation_types;

pub use comment_moderation_service::CommentModerationService;

pub use comment_moderation_types::{
    CommentDashboard,
    CommentSummary,
    CommentView,
    ReplyRequest,
    UserSummary,
};
