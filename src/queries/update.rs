//! `UPDATE` statements.

use super::builder::helpers::where_clause;
use super::builder::{CompiledQuery, ParamBinder, Predicate, QueryBuilder, QueryError};
use crate::db::Record;

/// Partial update of the rows matching `predicates`.
///
/// SET entries are emitted sorted by column name, independent of the
/// change map's iteration order, so the same change always compiles to the
/// same text. WHERE placeholders continue numbering after the SET values.
#[derive(Debug, Clone)]
pub struct UpdateQuery<'a> {
    pub table: &'a str,
    pub predicates: &'a [Predicate],
    pub changes: &'a Record,
}

impl<'a> UpdateQuery<'a> {
    pub fn new(table: &'a str, predicates: &'a [Predicate], changes: &'a Record) -> Self {
        Self {
            table,
            predicates,
            changes,
        }
    }
}

impl QueryBuilder for UpdateQuery<'_> {
    fn compile(&self) -> Result<CompiledQuery, QueryError> {
        if self.changes.is_empty() {
            return Err(QueryError::EmptyUpdate {
                table: self.table.to_string(),
            });
        }

        let mut columns: Vec<(&String, &serde_json::Value)> = self.changes.iter().collect();
        columns.sort_by(|a, b| a.0.cmp(b.0));

        let mut binder = ParamBinder::new();
        let assignments: Vec<String> = columns
            .into_iter()
            .map(|(col, value)| format!("{} = {}", col, binder.bind(value.clone())))
            .collect();

        let sql = format!(
            "UPDATE {} SET {}{}",
            self.table,
            assignments.join(", "),
            where_clause(self.predicates, &mut binder)?
        );

        Ok(CompiledQuery::new(sql, binder))
    }
}
