//! Positional parameter binding.
//!
//! Collects query parameters in bind order and hands back the `$n`
//! placeholder that refers to each one.

use serde_json::Value;

use crate::db::Params;

/// Accumulates positional values for one statement.
///
/// Each `bind` call appends the value and returns `$n`, where `n` is the
/// value's 1-based position. Values are never de-duplicated: binding the same
/// value twice yields two placeholders and two entries.
#[derive(Debug, Clone, Default)]
pub struct ParamBinder {
    params: Params,
}

impl ParamBinder {
    /// Create a new, empty binder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return its placeholder token.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        self.params.push(value.into());
        format!("${}", self.params.len())
    }

    /// Consume the binder, returning the values in bind order.
    pub fn into_params(self) -> Params {
        self.params
    }
}
