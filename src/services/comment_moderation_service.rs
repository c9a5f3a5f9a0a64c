// src/services/comment_moderation_service.rs
//
// Comment moderation: list by status, change status, reply
//
// Each operation runs its SQLite work on the blocking pool. Writes go
// through `with_transaction`, so a failure at any step leaves no trace.

use rusqlite::Connection;
use std::sync::Arc;

use crate::db::{get_connection, with_transaction, ConnectionPool};
use crate::domain::{validate_comment, Comment, CommentId, CommentStatus, NewComment, User};
use crate::error::{AppError, AppResult};
use crate::repositories::{CommentRepository, PostRepository};
use crate::services::comment_moderation_types::{CommentDashboard, CommentView, ReplyRequest};

pub struct CommentModerationService {
    pool: Arc<ConnectionPool>,
    comment_repo: Arc<dyn CommentRepository>,
    post_repo: Arc<dyn PostRepository>,
}

impl CommentModerationService {
    pub fn new(
        pool: Arc<ConnectionPool>,
        comment_repo: Arc<dyn CommentRepository>,
        post_repo: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            pool,
            comment_repo,
            post_repo,
        }
    }

    /// Every comment in the system, bucketed by status
    ///
    /// Not scoped to the caller. Store faults propagate unchanged.
    pub async fn list_all_comments(&self) -> AppResult<CommentDashboard> {
        let comment_repo = self.comment_repo.clone();

        let records = self
            .run_blocking(move |conn| comment_repo.list_with_relations(conn))
            .await?;

        let views: Vec<CommentView> = records.into_iter().map(CommentView::from).collect();
        let dashboard = CommentDashboard::from_views(views);

        log::debug!(
            "listed {} comments ({} approved, {} pending, {} spam, {} trash)",
            dashboard.number_of_comments,
            dashboard.number_of_approved_comments,
            dashboard.number_of_pending_comments,
            dashboard.number_of_spam_comments,
            dashboard.number_of_deleted_comments,
        );

        Ok(dashboard)
    }

    /// Overwrite a comment's status; any status may follow any other
    pub async fn update_comment_status(
        &self,
        comment_id: CommentId,
        status: CommentStatus,
    ) -> AppResult<()> {
        let comment_repo = self.comment_repo.clone();

        let result = self
            .run_blocking(move |conn| {
                with_transaction(conn, |tx| {
                    let mut comment = comment_repo
                        .find_by_id(tx, comment_id)?
                        .ok_or_else(|| AppError::not_found(format!("comment {}", comment_id)))?;

                    comment.set_status(status);
                    comment_repo.update(tx, &comment)
                })
            })
            .await;

        match &result {
            Ok(()) => log::info!("comment {} set to {}", comment_id, status),
            Err(e) => log::warn!("status update of comment {} rolled back: {}", comment_id, e),
        }

        result
    }

    /// Insert a pending reply authored by `author`
    ///
    /// The post and the parent comment must both exist.
    pub async fn reply_to_comment(&self, author: &User, request: ReplyRequest) -> AppResult<Comment> {
        let comment_repo = self.comment_repo.clone();
        let post_repo = self.post_repo.clone();
        let author_id = author.id;
        let post_id = request.post_id;
        let parent_id = request.parent_id;

        let result = self
            .run_blocking(move |conn| {
                with_transaction(conn, |tx| {
                    let post = post_repo
                        .find_by_id(tx, request.post_id)?
                        .ok_or_else(|| AppError::not_found(format!("post {}", request.post_id)))?;

                    comment_repo
                        .find_by_id(tx, request.parent_id)?
                        .ok_or_else(|| {
                            AppError::not_found(format!("parent comment {}", request.parent_id))
                        })?;

                    let reply = NewComment::reply(post.id, request.parent_id, author_id, request.body);
                    validate_comment(&reply)?;

                    comment_repo.insert(tx, &reply)
                })
            })
            .await;

        match &result {
            Ok(comment) => log::info!(
                "user {} replied to comment {} on post {} (comment {})",
                author_id,
                parent_id,
                post_id,
                comment.id
            ),
            Err(e) => log::warn!(
                "reply to comment {} on post {} rolled back: {}",
                parent_id,
                post_id,
                e
            ),
        }

        result
    }

    async fn run_blocking<T, F>(&self, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection(&pool)?;
            work(&mut *conn)
        })
        .await?
    }
}
