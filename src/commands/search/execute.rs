use std::error::Error;

use serde::Serialize;

use super::SearchCmd;
use crate::commands::{Client, Execute};
use crate::db::Record;

/// Result of the search command
#[derive(Debug, Default, Serialize)]
pub struct SearchResult {
    pub table: String,
    pub total: usize,
    pub rows: Vec<Record>,
}

impl Execute for SearchCmd {
    type Output = SearchResult;

    fn execute(self, client: &Client) -> Result<Self::Output, Box<dyn Error>> {
        let mut spec = self.spec.to_spec()?;
        if let Some(limit) = self.limit {
            spec = spec.limit(limit);
        }

        let rows = client.search(&self.table, &spec)?;
        Ok(SearchResult {
            table: self.table,
            total: rows.len(),
            rows,
        })
    }
}
