// src/db/transaction.rs
//
// Transactional scope for multi-step writes
//
// The closure either runs to completion and commits, or its error rolls
// the whole transaction back. A panic inside the closure drops the
// transaction, which rusqlite also rolls back.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::AppResult;

/// Run `work` inside an IMMEDIATE transaction on `conn`
///
/// IMMEDIATE takes the write lock up front so read-then-write sequences
/// never fail on lock upgrade; concurrent writers wait on busy_timeout.
pub fn with_transaction<T, F>(conn: &mut Connection, work: F) -> AppResult<T>
where
    F: FnOnce(&Transaction<'_>) -> AppResult<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    match work(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                log::error!("rollback failed after '{}': {}", err, rollback_err);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;
    use crate::error::AppError;

    fn setup() -> Connection {
        let conn = create_test_connection().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL)").unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_commits_on_success() {
        let mut conn = setup();

        let value = with_transaction(&mut conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])?;
            tx.execute("INSERT INTO t (v) VALUES (2)", [])?;
            Ok(42)
        })
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(count(&conn), 2);
    }

    #[test]
    fn test_rolls_back_on_error() {
        let mut conn = setup();

        let result: AppResult<()> = with_transaction(&mut conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])?;
            Err(AppError::not_found("later step"))
        });

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_rolls_back_on_store_fault() {
        let mut conn = setup();

        let result: AppResult<()> = with_transaction(&mut conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])?;
            tx.execute("INSERT INTO t (v) VALUES (NULL)", [])?;
            Ok(())
        });

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(count(&conn), 0);
    }
}
