//! Connection provider trait for abstracting database implementations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::DbError;

/// A single result row, keyed by column name in the order the store returned them.
pub type Record = Map<String, Value>;

/// Positional query parameters. `params[0]` binds to `$1`.
pub type Params = Vec<Value>;

/// Result of a statement execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub rows: Vec<Record>,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// First row, if any.
    pub fn first(&self) -> Option<&Record> {
        self.rows.first()
    }

    pub fn into_first(self) -> Option<Record> {
        self.rows.into_iter().next()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Record>> for QueryResult {
    fn from(rows: Vec<Record>) -> Self {
        Self { rows }
    }
}

/// Trait for backends that execute raw SQL with positional parameters.
///
/// Implementations must preserve column names as the underlying store
/// reports them. Failures are returned as-is; there is no retry at this layer.
pub trait ConnectionProvider: Send + Sync {
    /// Execute a statement, returning its rows (empty for writes without RETURNING).
    fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError>;

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for Box<P> {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError> {
        (**self).execute(sql, params)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}
