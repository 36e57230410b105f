//! `SELECT COUNT(*)` statements.

use serde_json::Value;

use super::builder::helpers::where_clause;
use super::builder::{CompiledQuery, ParamBinder, Predicate, QueryBuilder, QueryError};
use crate::db::{DatabaseValue, QueryResult};

/// Column alias carrying the count in the result row.
pub const COUNT_COLUMN: &str = "cnt";

/// `SELECT COUNT(*) AS cnt FROM <table>` with an optional WHERE.
#[derive(Debug, Clone)]
pub struct CountQuery<'a> {
    pub table: &'a str,
    pub predicates: &'a [Predicate],
}

impl<'a> CountQuery<'a> {
    pub fn new(table: &'a str, predicates: &'a [Predicate]) -> Self {
        Self { table, predicates }
    }
}

impl QueryBuilder for CountQuery<'_> {
    fn compile(&self) -> Result<CompiledQuery, QueryError> {
        let mut binder = ParamBinder::new();
        let sql = format!(
            "SELECT COUNT(*) AS {} FROM {}{}",
            COUNT_COLUMN,
            self.table,
            where_clause(self.predicates, &mut binder)?
        );
        Ok(CompiledQuery::new(sql, binder))
    }
}

/// Read the count from the first row's `cnt` field, defaulting to 0.
pub fn extract_count(result: &QueryResult) -> i64 {
    result
        .first()
        .and_then(|row| row.get(COUNT_COLUMN))
        .map(|v: &Value| v.extract_i64_or(0))
        .unwrap_or(0)
}
