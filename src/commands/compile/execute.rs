use std::error::Error;

use serde::Serialize;
use serde_json::Value;

use super::{CompileCmd, StatementKind};
use crate::queries::{CountQuery, DeleteQuery, QueryBuilder, SelectQuery};

/// Result of the compile command
#[derive(Debug, Serialize)]
pub struct CompileResult {
    pub table: String,
    pub sql: String,
    pub params: Vec<Value>,
}

impl CompileCmd {
    /// Compile without touching a database.
    pub fn compile(self) -> Result<CompileResult, Box<dyn Error>> {
        let spec = self.spec.to_spec()?;
        let table = self.table.as_str();

        let compiled = match self.kind {
            StatementKind::Select => SelectQuery::new(table, &spec).compile()?,
            StatementKind::One => SelectQuery::single(table, &spec).compile()?,
            StatementKind::Count => CountQuery::new(table, &spec.predicates).compile()?,
            StatementKind::Delete => DeleteQuery::new(table, &spec.predicates).compile()?,
        };

        Ok(CompileResult {
            table: self.table,
            sql: compiled.sql,
            params: compiled.params,
        })
    }
}
