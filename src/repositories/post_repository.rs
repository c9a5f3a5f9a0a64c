// src/repositories/post_repository.rs
//
// Post persistence. Moderation only reads posts; insert exists for seeding.

use chrono::Utc;
use rusqlite::{params, Connection, Row};

use super::{single_or_default, timestamp_column};
use crate::domain::{Post, PostId};
use crate::error::AppResult;

pub trait PostRepository: Send + Sync {
    fn find_by_id(&self, conn: &Connection, id: PostId) -> AppResult<Option<Post>>;
    fn list_all(&self, conn: &Connection) -> AppResult<Vec<Post>>;
    fn insert(&self, conn: &Connection, title: &str) -> AppResult<Post>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SqlitePostRepository;

impl SqlitePostRepository {
    pub fn new() -> Self {
        Self
    }

    fn row_to_post(row: &Row) -> Result<Post, rusqlite::Error> {
        Ok(Post {
            id: PostId(row.get("id")?),
            title: row.get("title")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

impl PostRepository for SqlitePostRepository {
    fn find_by_id(&self, conn: &Connection, id: PostId) -> AppResult<Option<Post>> {
        let mut stmt = conn.prepare("SELECT id, title, created_at FROM posts WHERE id = ?1")?;
        let rows = stmt.query(params![id.0])?;

        single_or_default(rows, "post", Self::row_to_post)
    }

    fn list_all(&self, conn: &Connection) -> AppResult<Vec<Post>> {
        let mut stmt = conn.prepare("SELECT id, title, created_at FROM posts ORDER BY id")?;

        let posts = stmt
            .query_map([], Self::row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn insert(&self, conn: &Connection, title: &str) -> AppResult<Post> {
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO posts (title, created_at) VALUES (?1, ?2)",
            params![title, created_at.to_rfc3339()],
        )?;

        Ok(Post {
            id: PostId(conn.last_insert_rowid()),
            title: title.to_string(),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_connection, initialize_database};

    #[test]
    fn test_insert_find_and_list() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        let repo = SqlitePostRepository::new();

        let first = repo.insert(&conn, "Release notes").unwrap();
        let second = repo.insert(&conn, "Roadmap").unwrap();

        assert_eq!(repo.find_by_id(&conn, second.id).unwrap(), Some(second.clone()));
        assert!(repo.find_by_id(&conn, PostId(999)).unwrap().is_none());

        let all = repo.list_all(&conn).unwrap();
        assert_eq!(all, vec![first, second]);
    }
}
