// src/identity/mod.rs
//
// Identity collaborator
//
// ARCHITECTURE:
// - Answers "who is calling" for the application layer
// - The identity string is available synchronously
// - The full User row is looked up on demand, asynchronously
// - Services never call this; callers resolve the user and pass it in

use async_trait::async_trait;
use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::repositories::UserRepository;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identity string of the caller (the user name)
    fn current_identity(&self) -> &str;

    /// Resolve the caller to a stored user
    async fn current_user(&self) -> AppResult<User>;
}

/// Identity bound to a configured user name for the lifetime of a session
pub struct SessionIdentity {
    user_name: String,
    pool: Arc<ConnectionPool>,
    users: Arc<dyn UserRepository>,
}

impl SessionIdentity {
    pub fn new(
        user_name: impl Into<String>,
        pool: Arc<ConnectionPool>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            pool,
            users,
        }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentity {
    fn current_identity(&self) -> &str {
        &self.user_name
    }

    async fn current_user(&self) -> AppResult<User> {
        let pool = self.pool.clone();
        let users = self.users.clone();
        let user_name = self.user_name.clone();

        tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            users
                .find_by_user_name(&conn, &user_name)?
                .ok_or_else(|| AppError::not_found(format!("user '{}'", user_name)))
        })
        .await?
    }
}
