//! Helper utilities for query building.
//!
//! Clause formatting shared by the statement builders so every statement
//! renders WHERE and ORDER BY the same way.

use serde_json::Value;

use super::{ParamBinder, Predicate, QueryError};
use crate::queries::search::OrderBy;

/// Format a list of column names as a comma-separated string.
pub fn format_fields<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render ` WHERE p1 AND p2 …`, or an empty string for no predicates.
///
/// Predicates are compiled left to right against the shared binder.
pub fn where_clause(predicates: &[Predicate], binder: &mut ParamBinder) -> Result<String, QueryError> {
    if predicates.is_empty() {
        return Ok(String::new());
    }

    let fragments = predicates
        .iter()
        .map(|p| p.compile(binder))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(" WHERE {}", fragments.join(" AND ")))
}

/// Render ` ORDER BY col DIR, …`, or an empty string.
pub fn order_by_clause(order: &[OrderBy]) -> String {
    if order.is_empty() {
        return String::new();
    }

    let terms: Vec<String> = order
        .iter()
        .map(|o| format!("{} {}", o.column, o.direction.as_sql()))
        .collect();
    format!(" ORDER BY {}", terms.join(", "))
}

/// Format positional parameters as `[$1=…, $2=…]` for logging.
pub fn format_params_debug(params: &[Value]) -> String {
    let items: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(i, v)| format!("${}={}", i + 1, v))
        .collect();
    format!("[{}]", items.join(", "))
}
