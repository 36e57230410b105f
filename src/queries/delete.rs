//! `DELETE` statements.

use super::builder::helpers::where_clause;
use super::builder::{CompiledQuery, ParamBinder, Predicate, QueryBuilder, QueryError};

/// `DELETE FROM <table>` with an optional WHERE.
///
/// An empty filter deletes every row; callers decide whether that is allowed.
#[derive(Debug, Clone)]
pub struct DeleteQuery<'a> {
    pub table: &'a str,
    pub predicates: &'a [Predicate],
}

impl<'a> DeleteQuery<'a> {
    pub fn new(table: &'a str, predicates: &'a [Predicate]) -> Self {
        Self { table, predicates }
    }
}

impl QueryBuilder for DeleteQuery<'_> {
    fn compile(&self) -> Result<CompiledQuery, QueryError> {
        let mut binder = ParamBinder::new();
        let sql = format!(
            "DELETE FROM {}{}",
            self.table,
            where_clause(self.predicates, &mut binder)?
        );
        Ok(CompiledQuery::new(sql, binder))
    }
}
