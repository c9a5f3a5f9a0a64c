// src/repositories/user_repository.rs
//
// User persistence, used by the identity provider and for seeding

use rusqlite::{params, Connection, Row};

use super::single_or_default;
use crate::domain::{User, UserId};
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_name: String,
    pub display_name: String,
    pub email: Option<String>,
}

impl NewUser {
    pub fn new(user_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            display_name: display_name.into(),
            email: None,
        }
    }
}

pub trait UserRepository: Send + Sync {
    fn find_by_user_name(&self, conn: &Connection, user_name: &str) -> AppResult<Option<User>>;
    fn insert(&self, conn: &Connection, user: &NewUser) -> AppResult<User>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteUserRepository;

impl SqliteUserRepository {
    pub fn new() -> Self {
        Self
    }

    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        Ok(User {
            id: UserId(row.get("id")?),
            user_name: row.get("user_name")?,
            display_name: row.get("display_name")?,
            email: row.get("email")?,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn find_by_user_name(&self, conn: &Connection, user_name: &str) -> AppResult<Option<User>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_name, display_name, email FROM users WHERE user_name = ?1",
        )?;
        let rows = stmt.query(params![user_name])?;

        single_or_default(rows, "user", Self::row_to_user)
    }

    fn insert(&self, conn: &Connection, user: &NewUser) -> AppResult<User> {
        conn.execute(
            "INSERT INTO users (user_name, display_name, email) VALUES (?1, ?2, ?3)",
            params![user.user_name, user.display_name, user.email],
        )?;

        Ok(User {
            id: UserId(conn.last_insert_rowid()),
            user_name: user.user_name.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
        })
    }
}
