//! Output formatting for search command results.

use super::execute::SearchResult;
use crate::output::{Outputable, format_record};

impl Outputable for SearchResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Search: {}", self.table));
        lines.push(String::new());

        if self.rows.is_empty() {
            lines.push("No rows found.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Rows ({}):", self.total));
        for row in &self.rows {
            lines.push(format!("  {}", format_record(row)));
        }

        lines.join("\n")
    }
}
