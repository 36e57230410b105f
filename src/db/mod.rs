//! Connection providers for executing compiled SQL.
//!
//! This module provides the execution layer underneath the query compiler:
//! - The `ConnectionProvider` trait every backend implements
//! - A live PostgreSQL provider backed by the synchronous `postgres` client
//! - A stub provider ("null" construction) answering from a canned registry
//! - Runtime selection of the provider from config file, env or URL
//!
//! # Type Decisions
//!
//! **Why `serde_json::Value` for bound parameters and row cells?**
//! Records flow in from callers as JSON-shaped maps and flow out to callers the
//! same way. Keeping one value type end to end means the stub registry, the
//! CLI and the repositories all speak the same shape, and `preserve_order`
//! keeps record key order intact for INSERT column lists.
//!
//! **Why a synchronous provider?**
//! Every public operation is exactly one round-trip with no internal
//! parallelism. Blocking calls keep the compiler and client free of runtime
//! concerns.

mod backend;
mod connection;
pub mod config;
pub mod postgres;
pub mod stub;
mod value;

pub use backend::{ConnectionProvider, Params, QueryResult, Record};
pub use config::{DatabaseConfig, PostgresConfig};
pub use connection::{open_db, open_null_db};
pub use postgres::PostgresProvider;
pub use stub::{normalize_query, StubEntry, StubProvider};
pub use value::DatabaseValue;

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to database '{target}': {message}")]
    ConnectFailed { target: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Unsupported value for column '{column}': {type_name}")]
    UnsupportedValue { column: String, type_name: String },

    #[error("Failed to load stub registry '{path}': {message}")]
    RegistryLoad { path: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}
