// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations
// - Transactional scope

pub mod connection;
pub mod migrations;
pub mod transaction;

pub use connection::{
    create_connection_pool, create_test_connection, get_connection, get_database_path,
    ConnectionPool, PooledConn,
};

pub use migrations::{
    get_database_stats, initialize_database, schema_version, verify_database_integrity,
    DatabaseStats,
};

pub use transaction::with_transaction;
