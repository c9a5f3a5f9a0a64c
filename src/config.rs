// src/config.rs
//
// Runtime configuration
//
// Resolution order: built-in defaults, then the optional TOML file, then
// environment variables. CLI flags are applied by the binary on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Environment variable overriding `database.path`
pub const DATABASE_ENV: &str = "COMMENT_MOD_DATABASE";

/// Environment variable overriding `identity.user_name`
pub const USER_ENV: &str = "COMMENT_MOD_USER";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub identity: IdentityConfig,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; `None` means the per-user data directory
    pub path: Option<PathBuf>,
    /// Pool size
    pub max_connections: u32,
    /// How long SQLite waits on a locked database before failing
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 15,
            busy_timeout_ms: 5000,
        }
    }
}

/// Who the moderation session acts as
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub user_name: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_name: "admin".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional file plus the environment
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> AppResult<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATABASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Some(user) = lookup(USER_ENV).filter(|v| !v.trim().is_empty()) {
            self.identity.user_name = user;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.max_connections == 0 {
            return Err(AppError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.identity.user_name.trim().is_empty() {
            return Err(AppError::Config(
                "identity.user_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
