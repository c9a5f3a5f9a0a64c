// src/repositories/comment_repository.rs
//
// Comment persistence

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use super::{single_or_default, timestamp_column};
use crate::domain::{Comment, CommentId, CommentStatus, NewComment, Post, PostId, User, UserId};
use crate::error::{AppError, AppResult};

/// A comment loaded together with its post and author
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub comment: Comment,
    pub post: Post,
    pub author: User,
}

pub trait CommentRepository: Send + Sync {
    /// Every comment with its post and author, ordered by id
    fn list_with_relations(&self, conn: &Connection) -> AppResult<Vec<CommentRecord>>;
    fn find_by_id(&self, conn: &Connection, id: CommentId) -> AppResult<Option<Comment>>;
    fn insert(&self, conn: &Connection, comment: &NewComment) -> AppResult<Comment>;
    fn update(&self, conn: &Connection, comment: &Comment) -> AppResult<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteCommentRepository;

const COMMENT_COLUMNS: &str = "c.id AS id, c.parent_id AS parent_id, c.post_id AS post_id,
    c.user_id AS user_id, c.content AS content, c.status AS status,
    c.created_at AS created_at, c.updated_at AS updated_at";

impl SqliteCommentRepository {
    pub fn new() -> Self {
        Self
    }

    fn row_to_comment(row: &Row) -> Result<Comment, rusqlite::Error> {
        let status_str: String = row.get("status")?;
        let status = status_str.parse::<CommentStatus>().map_err(|e| {
            let idx = row.as_ref().column_index("status").unwrap_or(0);
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })?;

        Ok(Comment {
            id: CommentId(row.get("id")?),
            parent_id: row.get::<_, Option<i64>>("parent_id")?.map(CommentId),
            post_id: PostId(row.get("post_id")?),
            user_id: UserId(row.get("user_id")?),
            content: row.get("content")?,
            status,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }

    fn row_to_record(row: &Row) -> Result<CommentRecord, rusqlite::Error> {
        let comment = Self::row_to_comment(row)?;

        let post = Post {
            id: comment.post_id,
            title: row.get("post_title")?,
            created_at: timestamp_column(row, "post_created_at")?,
        };

        let author = User {
            id: comment.user_id,
            user_name: row.get("user_name")?,
            display_name: row.get("display_name")?,
            email: row.get("email")?,
        };

        Ok(CommentRecord { comment, post, author })
    }
}

impl CommentRepository for SqliteCommentRepository {
    fn list_with_relations(&self, conn: &Connection) -> AppResult<Vec<CommentRecord>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS},
                    p.title AS post_title, p.created_at AS post_created_at,
                    u.user_name AS user_name, u.display_name AS display_name, u.email AS email
             FROM comments c
             JOIN posts p ON p.id = c.post_id
             JOIN users u ON u.id = c.user_id
             ORDER BY c.id"
        );
        let mut stmt = conn.prepare(&sql)?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn find_by_id(&self, conn: &Connection, id: CommentId) -> AppResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments c WHERE c.id = ?1");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query(params![id.0])?;

        single_or_default(rows, "comment", Self::row_to_comment)
    }

    fn insert(&self, conn: &Connection, comment: &NewComment) -> AppResult<Comment> {
        let created_at = comment.created_at.to_rfc3339();

        conn.execute(
            "INSERT INTO comments (parent_id, post_id, user_id, content, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                comment.parent_id.map(|p| p.0),
                comment.post_id.0,
                comment.user_id.0,
                comment.content,
                comment.status.as_str(),
                created_at,
            ],
        )?;

        let id = CommentId(conn.last_insert_rowid());
        Ok(comment.clone().into_comment(id))
    }

    fn update(&self, conn: &Connection, comment: &Comment) -> AppResult<()> {
        let rows_affected = conn.execute(
            "UPDATE comments
             SET parent_id = ?2, content = ?3, status = ?4, updated_at = ?5
             WHERE id = ?1",
            params![
                comment.id.0,
                comment.parent_id.map(|p| p.0),
                comment.content,
                comment.status.as_str(),
                comment.updated_at.to_rfc3339(),
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::not_found(format!("comment {}", comment.id)));
        }

        Ok(())
    }
}
