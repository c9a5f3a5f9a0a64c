// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are plain data mappers
// - NO business logic, NO invariant enforcement
// - NO cross-repository calls
// - Explicit SQL only
// - The caller supplies the connection, so several repositories can share
//   one transaction

pub mod comment_repository;
pub mod post_repository;
pub mod user_repository;

pub use comment_repository::{CommentRecord, CommentRepository, SqliteCommentRepository};
pub use post_repository::{PostRepository, SqlitePostRepository};
pub use user_repository::{NewUser, SqliteUserRepository, UserRepository};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Row, Rows};

use crate::error::{AppError, AppResult};

/// Read an RFC 3339 text column as a UTC timestamp
pub(crate) fn timestamp_column(row: &Row, column: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            let idx = row.as_ref().column_index(column).unwrap_or(0);
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })
}

/// "Single or default": no row is `None`, one row is `Some`, more than one is a conflict
pub(crate) fn single_or_default<T, F>(mut rows: Rows<'_>, what: &str, map: F) -> AppResult<Option<T>>
where
    F: Fn(&Row) -> Result<T, rusqlite::Error>,
{
    let first = match rows.next()? {
        Some(row) => map(row)?,
        None => return Ok(None),
    };

    if rows.next()?.is_some() {
        return Err(AppError::Conflict(format!("more than one {} matched", what)));
    }

    Ok(Some(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_connection;

    #[test]
    fn test_single_or_default() {
        let conn = create_test_connection().unwrap();
        conn.execute_batch("CREATE TABLE t (k INTEGER, v TEXT); INSERT INTO t VALUES (1, 'a'), (2, 'b'), (2, 'c');")
            .unwrap();
        let mut stmt = conn.prepare("SELECT v FROM t WHERE k = ?1").unwrap();
        fn get(row: &Row) -> Result<String, rusqlite::Error> {
            row.get(0)
        }

        let none = single_or_default(stmt.query([0]).unwrap(), "row", get).unwrap();
        assert!(none.is_none());

        let one = single_or_default(stmt.query([1]).unwrap(), "row", get).unwrap();
        assert_eq!(one.as_deref(), Some("a"));

        let many = single_or_default(stmt.query([2]).unwrap(), "row", get);
        assert!(matches!(many, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_timestamp_column_rejects_garbage() {
        let conn = create_test_connection().unwrap();
        let result = conn.query_row("SELECT 'yesterday' AS ts", [], |row| {
            timestamp_column(row, "ts")
        });
        assert!(result.is_err());
    }
}
