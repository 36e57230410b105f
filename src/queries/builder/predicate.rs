//! Structured filter predicates and their SQL translation.
//!
//! | Predicate | Fragment |
//! |---|---|
//! | `Equals(col, v)` | `col = $k`, or `col IS NULL` when `v` is null |
//! | `In(col, vs)` | `col IN ($k, $k+1, …)`; an empty list stays `col IN ()` |
//! | `NotIn(col, vs)` | `col NOT IN ($k, …)` |
//! | `ArrayContains(col, v)` | `$k = ANY(col)` |
//! | `TextSearch(cols, v)` | `col ILIKE $k` per column, OR-joined, one bind of `%v%` |
//!
//! JSON form is a single-key object naming the kind:
//! `{"equals": {"column": "id", "value": "1"}}`,
//! `{"in": {"column": "status", "values": ["a", "b"]}}`,
//! `{"notIn": {...}}`, `{"arrayContains": {"column": "tags", "value": "x"}}`,
//! `{"textSearch": {"columns": ["name", "email"], "value": "ali"}}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ParamBinder, QueryError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub enum Predicate {
    Equals { column: String, value: Value },
    In { column: String, values: Vec<Value> },
    NotIn { column: String, values: Vec<Value> },
    ArrayContains { column: String, value: Value },
    TextSearch { columns: Vec<String>, value: String },
}

impl Predicate {
    pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::equals(column, Value::Null)
    }

    pub fn in_list<V: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_in<V: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self::NotIn {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn array_contains(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::ArrayContains {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn text_search<C: Into<String>>(
        columns: impl IntoIterator<Item = C>,
        value: impl Into<String>,
    ) -> Self {
        Self::TextSearch {
            columns: columns.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }

    /// Parse one predicate from its JSON form.
    ///
    /// Any shape that isn't exactly one known kind with its fields is
    /// rejected as `QueryError::UnsupportedPredicate`.
    pub fn from_json(value: &Value) -> Result<Self, QueryError> {
        serde_json::from_value(value.clone()).map_err(|_| QueryError::UnsupportedPredicate {
            shape: value.to_string(),
        })
    }

    /// Compile to a SQL boolean fragment, binding literal values into `binder`.
    pub fn compile(&self, binder: &mut ParamBinder) -> Result<String, QueryError> {
        let fragment = match self {
            Self::Equals { column, value } if value.is_null() => format!("{} IS NULL", column),
            Self::Equals { column, value } => format!("{} = {}", column, binder.bind(value.clone())),
            Self::In { column, values } => format!("{} IN ({})", column, bind_list(binder, values)),
            Self::NotIn { column, values } => {
                format!("{} NOT IN ({})", column, bind_list(binder, values))
            }
            Self::ArrayContains { column, value } => {
                format!("{} = ANY({})", binder.bind(value.clone()), column)
            }
            Self::TextSearch { columns, value } => {
                if columns.is_empty() {
                    return Err(QueryError::UnsupportedPredicate {
                        shape: "textSearch with no columns".to_string(),
                    });
                }
                let placeholder = binder.bind(format!("%{}%", value));
                let clauses: Vec<String> = columns
                    .iter()
                    .map(|col| format!("{} ILIKE {}", col, placeholder))
                    .collect();
                if clauses.len() > 1 {
                    format!("({})", clauses.join(" OR "))
                } else {
                    clauses.join("")
                }
            }
        };
        Ok(fragment)
    }
}

fn bind_list(binder: &mut ParamBinder, values: &[Value]) -> String {
    values
        .iter()
        .map(|v| binder.bind(v.clone()))
        .collect::<Vec<_>>()
        .join(", ")
}
