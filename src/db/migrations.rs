// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic downgrade
// - Idempotent operations

use rusqlite::Connection;
use crate::error::{AppError, AppResult};

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// A fresh file gets the embedded schema and its version row in a single
/// transaction. A known version is left alone; any other version is refused.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    match schema_version(conn)? {
        0 => {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(include_str!("../../schema.sql"))
                .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))?;
            record_version(&tx, CURRENT_SCHEMA_VERSION)?;
            tx.commit()?;
            log::info!("comment store created at schema version {}", CURRENT_SCHEMA_VERSION);
        }
        CURRENT_SCHEMA_VERSION => {
            log::debug!("comment store already at schema version {}", CURRENT_SCHEMA_VERSION);
        }
        found if found < CURRENT_SCHEMA_VERSION => {
            return Err(AppError::Other(format!(
                "Comment store is at schema version {}, this build needs {}; migrate it first",
                found, CURRENT_SCHEMA_VERSION
            )));
        }
        found => {
            return Err(AppError::Other(format!(
                "Comment store is at schema version {}, newer than this build ({})",
                found, CURRENT_SCHEMA_VERSION
            )));
        }
    }

    Ok(())
}

/// Highest applied schema version, 0 for a file with no schema yet
pub fn schema_version(conn: &Connection) -> AppResult<i32> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

fn record_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Page-level integrity plus dangling comment references
///
/// Collects every problem SQLite reports instead of stopping at the first,
/// so `check` can print the whole list.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let mut problems: Vec<String> = conn
        .prepare("PRAGMA integrity_check")?
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|line| line != "ok")
        .collect();

    let dangling = conn
        .prepare("PRAGMA foreign_key_check")?
        .query_map([], |row| {
            let table: String = row.get(0)?;
            let rowid: Option<i64> = row.get(1)?;
            let parent: String = row.get(2)?;
            Ok(format!(
                "{} row {} points at a missing {} row",
                table,
                rowid.map_or_else(|| "?".to_string(), |id| id.to_string()),
                parent
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    problems.extend(dangling);

    if problems.is_empty() {
        log::debug!("integrity check passed");
        return Ok(());
    }

    for problem in &problems {
        log::warn!("integrity: {}", problem);
    }
    Err(AppError::Other(format!(
        "Database integrity check failed: {}",
        problems.join("; ")
    )))
}

/// Size, schema version and row counts, for the `check` command
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let count = |table: &str| -> AppResult<i64> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?)
    };

    Ok(DatabaseStats {
        schema_version: schema_version(conn)?,
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        user_count: count("users")?,
        post_count: count("posts")?,
        comment_count: count("comments")?,
    })
}

#[derive(Debug)]
pub struct DatabaseStats {
    pub schema_version: i32,
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub user_count: i64,
    pub post_count: i64,
    pub comment_count: i64,
}
