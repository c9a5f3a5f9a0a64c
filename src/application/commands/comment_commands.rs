// src/application/commands/comment_commands.rs
//
// Comment Moderation Command Handlers
//
// RULES:
// - Accept DTOs and raw ids
// - Call the moderation service
// - Return DTOs; write commands never fail, they report success or not
// - Never contain business logic

use crate::application::{dto::*, error_handling::ErrorResponse, state::AppState};
use crate::domain::{CommentId, CommentStatus, PostId};
use crate::services::ReplyRequest;

/// List every comment bucketed by status
///
/// Store faults propagate as the error string.
pub async fn list_comments(state: &AppState) -> Result<CommentDashboardDto, String> {
    let dashboard = state
        .comment_service
        .list_all_comments()
        .await
        .map_err(|e| e.to_string())?;

    Ok(CommentDashboardDto::from(dashboard))
}

/// Set a comment's moderation status
pub async fn update_comment_status(state: &AppState, comment_id: i64, status: &str) -> ActionResponse {
    let status = match status.parse::<CommentStatus>() {
        Ok(status) => status,
        Err(e) => return ActionResponse::failed(ErrorResponse::validation(e.to_string())),
    };

    match state
        .comment_service
        .update_comment_status(CommentId(comment_id), status)
        .await
    {
        Ok(()) => ActionResponse::ok(comment_id),
        Err(e) => ActionResponse::failed(ErrorResponse::from_app_error(e)),
    }
}

/// Reply to a comment as the current user
///
/// The user is resolved through the identity provider on every call.
pub async fn reply_to_comment(state: &AppState, dto: ReplyCommentDto) -> ActionResponse {
    let author = match state.identity.current_user().await {
        Ok(user) => user,
        Err(e) => {
            log::warn!(
                "could not resolve reply author '{}': {}",
                state.identity.current_identity(),
                e
            );
            return ActionResponse::failed(ErrorResponse::from_app_error(e));
        }
    };
    log::debug!(
        "{} (user {}) replying to comment {} on post {}",
        state.identity.current_identity(),
        author.id,
        dto.parent_id,
        dto.post_id
    );

    let request = ReplyRequest {
        post_id: PostId(dto.post_id),
        parent_id: CommentId(dto.parent_id),
        body: dto.comment_body,
    };

    match state.comment_service.reply_to_comment(&author, request).await {
        Ok(comment) => ActionResponse::ok(comment.id.0),
        Err(e) => ActionResponse::failed(ErrorResponse::from_app_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error_handling::ErrorType;
    use crate::config::DatabaseConfig;
    use crate::db::{create_connection_pool, initialize_database, ConnectionPool};
    use crate::domain::{NewComment, User};
    use crate::error::AppError;
    use crate::identity::{IdentityProvider, MockIdentityProvider};
    use crate::repositories::*;
    use crate::services::CommentModerationService;
    use std::sync::Arc;

    struct Harness {
        _dir: tempfile::TempDir,
        pool: Arc<ConnectionPool>,
        post_id: i64,
        parent_id: i64,
        moderator: User,
    }

    impl Harness {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = DatabaseConfig {
                path: Some(dir.path().join("commands.db")),
                ..DatabaseConfig::default()
            };
            let pool = Arc::new(create_connection_pool(&config).unwrap());
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();

            let post = SqlitePostRepository::new().insert(&conn, "Weekly digest").unwrap();
            let users = SqliteUserRepository::new();
            let reader = users.insert(&conn, &NewUser::new("reader", "Reader")).unwrap();
            let moderator = users.insert(&conn, &NewUser::new("mod", "Moderator")).unwrap();
            let parent = SqliteCommentRepository::new()
                .insert(
                    &conn,
                    &NewComment {
                        parent_id: None,
                        post_id: post.id,
                        user_id: reader.id,
                        content: "Is there an RSS feed?".to_string(),
                        status: CommentStatus::Approved,
                        created_at: chrono::Utc::now(),
                    },
                )
                .unwrap();
            drop(conn);

            Self {
                _dir: dir,
                pool,
                post_id: post.id.0,
                parent_id: parent.id.0,
                moderator,
            }
        }

        fn state(&self, identity: Arc<dyn IdentityProvider>) -> AppState {
            AppState {
                comment_service: Arc::new(CommentModerationService::new(
                    self.pool.clone(),
                    Arc::new(SqliteCommentRepository::new()),
                    Arc::new(SqlitePostRepository::new()),
                )),
                identity,
            }
        }

        fn identity_returning(&self, calls: usize) -> Arc<dyn IdentityProvider> {
            let user = self.moderator.clone();
            let mut identity = MockIdentityProvider::new();
            identity
                .expect_current_identity()
                .return_const("mod".to_string());
            identity
                .expect_current_user()
                .times(calls)
                .returning(move || Ok(user.clone()));
            Arc::new(identity)
        }
    }

    #[tokio::test]
    async fn test_list_comments_returns_dto() {
        let harness = Harness::new();
        let state = harness.state(harness.identity_returning(0));

        let dashboard = list_comments(&state).await.unwrap();

        assert_eq!(dashboard.number_of_comments, 1);
        assert_eq!(dashboard.number_of_approved_comments, 1);
        assert_eq!(dashboard.approved_comments[0].status, "approved");
        assert_eq!(dashboard.approved_comments[0].post_title, "Weekly digest");
    }

    #[tokio::test]
    async fn test_update_status_success() {
        let harness = Harness::new();
        let state = harness.state(harness.identity_returning(0));

        let response = update_comment_status(&state, harness.parent_id, "spam").await;

        assert!(response.success);
        let dashboard = list_comments(&state).await.unwrap();
        assert_eq!(dashboard.number_of_spam_comments, 1);
        assert_eq!(dashboard.number_of_approved_comments, 0);
    }

    #[tokio::test]
    async fn test_update_status_unknown_status_is_validation() {
        let harness = Harness::new();
        let state = harness.state(harness.identity_returning(0));

        let response = update_comment_status(&state, harness.parent_id, "hidden").await;

        assert!(!response.success);
        assert_eq!(response.error.unwrap().error_type, ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_update_status_missing_comment_reports_not_found() {
        let harness = Harness::new();
        let state = harness.state(harness.identity_returning(0));

        let response = update_comment_status(&state, 12345, "approved").await;

        assert!(!response.success);
        assert_eq!(response.comment_id, None);
        assert_eq!(response.error.unwrap().error_type, ErrorType::NotFound);
    }

    #[tokio::test]
    async fn test_reply_resolves_identity_each_call() {
        let harness = Harness::new();
        let state = harness.state(harness.identity_returning(2));

        for body in ["First answer", "Second answer"] {
            let response = reply_to_comment(
                &state,
                ReplyCommentDto {
                    post_id: harness.post_id,
                    parent_id: harness.parent_id,
                    comment_body: body.to_string(),
                },
            )
            .await;
            assert!(response.success);
        }

        let dashboard = list_comments(&state).await.unwrap();
        assert_eq!(dashboard.number_of_pending_comments, 2);
        assert!(dashboard
            .pending_comments
            .iter()
            .all(|c| c.author_user_name == "mod" && c.parent_id == Some(harness.parent_id)));
    }

    #[tokio::test]
    async fn test_reply_without_identity_fails_before_touching_store() {
        let harness = Harness::new();
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_identity()
            .return_const("ghost".to_string());
        identity
            .expect_current_user()
            .times(1)
            .returning(|| Err(AppError::not_found("user 'ghost'")));
        let state = harness.state(Arc::new(identity));

        let response = reply_to_comment(
            &state,
            ReplyCommentDto {
                post_id: harness.post_id,
                parent_id: harness.parent_id,
                comment_body: "hello".to_string(),
            },
        )
        .await;

        assert!(!response.success);
        assert_eq!(response.error.unwrap().error_type, ErrorType::NotFound);
        assert_eq!(list_comments(&state).await.unwrap().number_of_comments, 1);
    }

    #[tokio::test]
    async fn test_reply_to_missing_post_fails() {
        let harness = Harness::new();
        let state = harness.state(harness.identity_returning(1));

        let response = reply_to_comment(
            &state,
            ReplyCommentDto {
                post_id: 777,
                parent_id: harness.parent_id,
                comment_body: "lost".to_string(),
            },
        )
        .await;

        assert!(!response.success);
        assert_eq!(response.comment_id, None);
        assert_eq!(response.error.unwrap().error_type, ErrorType::NotFound);
        assert_eq!(list_comments(&state).await.unwrap().number_of_comments, 1);
    }
}
