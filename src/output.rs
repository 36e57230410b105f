//! Output formatting for command results.
//!
//! Supports multiple output formats: table (human-readable), JSON, and toon.

use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

use crate::db::Record;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Token-efficient toon format
    Toon,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Toon => {
                let json_value = serde_json::to_value(self).unwrap_or_default();
                toon::encode(&json_value, None)
            }
        }
    }
}

/// Render one row as `col=value, …` in column order.
///
/// Strings are printed bare; everything else uses its JSON form.
pub fn format_record(record: &Record) -> String {
    record
        .iter()
        .map(|(column, value)| format!("{}={}", column, format_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_record() {
        let record = json!({"id": "1", "age": 30, "tags": ["a"], "email": null});
        assert_eq!(
            format_record(record.as_object().unwrap()),
            r#"id=1, age=30, tags=["a"], email=null"#
        );
    }

    #[test]
    fn test_format_record_empty() {
        assert_eq!(format_record(&Record::new()), "");
    }
}
