//! `INSERT … ON CONFLICT DO UPDATE` statements (save is upsert-by-primary-key).

use super::builder::helpers::format_fields;
use super::builder::{CompiledQuery, ParamBinder, QueryBuilder, QueryError};
use crate::db::Record;

/// Primary key column used for conflict detection.
pub const PRIMARY_KEY: &str = "id";

/// Full-row upsert of one record.
///
/// Columns appear in the record's own key order. Every column, the key
/// included, is overwritten from `EXCLUDED` on conflict, so a save always
/// replaces the whole row; partial changes go through `UpdateQuery`.
#[derive(Debug, Clone)]
pub struct UpsertQuery<'a> {
    pub table: &'a str,
    pub record: &'a Record,
}

impl<'a> UpsertQuery<'a> {
    pub fn new(table: &'a str, record: &'a Record) -> Self {
        Self { table, record }
    }
}

impl QueryBuilder for UpsertQuery<'_> {
    fn compile(&self) -> Result<CompiledQuery, QueryError> {
        if self.record.is_empty() {
            return Err(QueryError::EmptyRecord {
                table: self.table.to_string(),
            });
        }

        let mut binder = ParamBinder::new();
        let columns: Vec<&str> = self.record.keys().map(String::as_str).collect();
        let placeholders: Vec<String> = self
            .record
            .values()
            .map(|v| binder.bind(v.clone()))
            .collect();
        let assignments: Vec<String> = columns
            .iter()
            .map(|c| format!("{} = EXCLUDED.{}", c, c))
            .collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {}",
            self.table,
            format_fields(&columns),
            placeholders.join(", "),
            PRIMARY_KEY,
            assignments.join(", ")
        );

        Ok(CompiledQuery::new(sql, binder))
    }
}
