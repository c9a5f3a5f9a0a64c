// src/lib.rs
// Comment moderation store for a content-management admin
//
// Architecture:
// - Domain: comments, posts, users and the moderation status
// - Repositories: one narrow data mapper per aggregate, explicit SQL
// - Services: moderation operations, each write in one transaction
// - Identity: who the caller is, passed explicitly into writes
// - Application: DTOs and commands for the moderation UI

pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod identity;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_comment, Comment, CommentId, CommentStatus, DomainError, NewComment, Post, PostId,
    User, UserId,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, with_transaction, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    CommentRecord, CommentRepository, NewUser, PostRepository, SqliteCommentRepository,
    SqlitePostRepository, SqliteUserRepository, UserRepository,
};

// ============================================================================
// PUBLIC API - Identity & Services
// ============================================================================

pub use identity::{IdentityProvider, SessionIdentity};

pub use services::{
    CommentDashboard, CommentModerationService, CommentSummary, CommentView, ReplyRequest,
    UserSummary,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;
pub use application::commands;
pub use application::dto;
