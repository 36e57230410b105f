//! `SELECT` statements for searches and single-row lookups.

use super::builder::helpers::{order_by_clause, where_clause};
use super::builder::{CompiledQuery, ParamBinder, QueryBuilder, QueryError};
use super::search::SearchSpec;

/// `SELECT * FROM <table>` with the spec's WHERE, ORDER BY, OFFSET and LIMIT.
///
/// In single-row mode the spec's limit is replaced by a literal `LIMIT 1`,
/// which is never bound as a parameter.
#[derive(Debug, Clone)]
pub struct SelectQuery<'a> {
    pub table: &'a str,
    pub spec: &'a SearchSpec,
    pub single: bool,
}

impl<'a> SelectQuery<'a> {
    pub fn new(table: &'a str, spec: &'a SearchSpec) -> Self {
        Self {
            table,
            spec,
            single: false,
        }
    }

    /// Lookup of at most one row (`find_one` / `find_by_id`).
    pub fn single(table: &'a str, spec: &'a SearchSpec) -> Self {
        Self {
            table,
            spec,
            single: true,
        }
    }
}

impl QueryBuilder for SelectQuery<'_> {
    fn compile(&self) -> Result<CompiledQuery, QueryError> {
        let mut binder = ParamBinder::new();
        let mut sql = format!("SELECT * FROM {}", self.table);

        sql.push_str(&where_clause(&self.spec.predicates, &mut binder)?);
        sql.push_str(&order_by_clause(&self.spec.order_by));

        if let Some(offset) = self.spec.offset {
            sql.push_str(&format!(" OFFSET {}", binder.bind(offset)));
        }

        if self.single {
            sql.push_str(" LIMIT 1");
        } else if let Some(limit) = self.spec.limit {
            sql.push_str(&format!(" LIMIT {}", binder.bind(limit)));
        }

        Ok(CompiledQuery::new(sql, binder))
    }
}
