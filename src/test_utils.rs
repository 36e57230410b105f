//! Shared test utilities for execute and integration tests.
//!
//! This module provides common helpers used across command execute tests.

use std::io::Write;

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::client::DatabaseClient;
use crate::commands::Client;
use crate::db::{ConnectionProvider, QueryResult, Record, StubEntry, open_null_db};

/// Create a temporary file containing the given content.
///
/// Used to write stub registries and config files.
pub fn create_temp_json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// Build a result from a JSON array of row objects.
pub fn rows(value: Value) -> QueryResult {
    serde_json::from_value(serde_json::json!({ "rows": value })).expect("rows must be objects")
}

/// Build a record from a JSON object.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected a JSON object, got {}", other),
    }
}

/// Client over a stub answering only `entries`, boxed like the CLI's client.
pub fn stub_client(entries: Vec<StubEntry>) -> Client {
    let provider: Box<dyn ConnectionProvider> = Box::new(open_null_db(entries));
    DatabaseClient::new(provider)
}
