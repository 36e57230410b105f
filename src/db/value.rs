//! Lenient integer extraction from row cells.
//!
//! Row cells are `serde_json::Value`s, but stores disagree on how they report
//! aggregates: PostgreSQL's `COUNT(*)` is `bigint`, a registry entry may write
//! it as a float, and a driver that reads `numeric` falls back to text.

use serde_json::Value;

/// Trait for database values that can be read as integers.
pub trait DatabaseValue {
    /// Extract as i64 if the value is numeric.
    ///
    /// Floats are truncated; numeric strings are parsed.
    fn extract_i64(&self) -> Option<i64>;

    /// Extract as i64 with a default value.
    fn extract_i64_or(&self, default: i64) -> i64 {
        self.extract_i64().unwrap_or(default)
    }
}

impl DatabaseValue for Value {
    fn extract_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
