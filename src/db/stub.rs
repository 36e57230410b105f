//! Stub connection provider for dependency-free tests.
//!
//! A `StubProvider` answers `execute` calls from a fixed registry of canned
//! results instead of talking to a database. Entries are matched on the
//! whitespace-normalized SQL text and structurally equal parameters; the first
//! matching entry in registry order wins.
//!
//! An unmatched statement is not an error: the provider logs a warning and
//! returns an empty result set, so a misconfigured test fails on its own
//! assertions rather than on a provider error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::backend::{ConnectionProvider, Params, QueryResult};
use super::DbError;

/// One canned response in the stub registry.
///
/// JSON form: `{"query": "...", "params": [...], "result": {"rows": [...]}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StubEntry {
    pub query: String,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub result: QueryResult,
}

impl StubEntry {
    pub fn new(query: impl Into<String>, params: Params, result: QueryResult) -> Self {
        Self {
            query: query.into(),
            params,
            result,
        }
    }

    fn matches(&self, normalized_sql: &str, params: &[Value]) -> bool {
        self.query == normalized_sql && self.params.as_slice() == params
    }
}

/// Collapse every whitespace run to a single space and trim both ends.
///
/// Idempotent: `normalize_query(&normalize_query(s)) == normalize_query(s)`.
pub fn normalize_query(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Connection provider returning canned results for registered statements.
#[derive(Debug, Clone, Default)]
pub struct StubProvider {
    entries: Vec<StubEntry>,
}

impl StubProvider {
    /// Build a provider from registry entries. Entry queries are normalized once here.
    pub fn new(entries: Vec<StubEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.query = normalize_query(&entry.query);
                entry
            })
            .collect();
        Self { entries }
    }

    /// Parse a registry from its JSON array form.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<StubEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load a registry from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, DbError> {
        let content = fs::read_to_string(path).map_err(|e| DbError::RegistryLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_json_str(&content).map_err(|e| DbError::RegistryLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn entries(&self) -> &[StubEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConnectionProvider for StubProvider {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError> {
        let normalized = normalize_query(sql);

        match self.entries.iter().find(|e| e.matches(&normalized, params)) {
            Some(entry) => {
                debug!(query = %normalized, rows = entry.result.len(), "stub matched");
                Ok(entry.result.clone())
            }
            None => {
                warn!(
                    query = %normalized,
                    params = %serde_json::Value::Array(params.to_vec()),
                    "no stub registered for query; returning empty result"
                );
                Ok(QueryResult::empty())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "Stub"
    }
}
