//! Search specifications: predicates, ordering and pagination for one query.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::queries::builder::{Predicate, QueryError};

/// Sort direction, rendered upper-case in SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ASC", alias = "Asc")]
    Asc,
    #[serde(alias = "DESC", alias = "Desc")]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Predicates (AND-ed), ordering and pagination describing one query.
///
/// Empty `predicates` / `order_by` mean the clause is omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSpec {
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub predicates: Vec<Predicate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Wire form with predicates left raw so unknown shapes surface as
/// `UnsupportedPredicate` rather than a generic parse error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawSearchSpec {
    #[serde(rename = "where", default)]
    predicates: Vec<Value>,
    #[serde(default)]
    order_by: Vec<OrderBy>,
    #[serde(default)]
    offset: Option<u64>,
    #[serde(default)]
    limit: Option<u64>,
}

impl SearchSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spec matching every row where all `predicates` hold.
    pub fn matching(predicates: Vec<Predicate>) -> Self {
        Self {
            predicates,
            ..Self::default()
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(OrderBy::new(column, direction));
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Parse the JSON form:
    /// `{"where": [...], "orderBy": [{"column", "direction"}], "offset": n, "limit": n}`.
    pub fn from_json(value: &Value) -> Result<Self, QueryError> {
        let raw: RawSearchSpec =
            serde_json::from_value(value.clone()).map_err(|e| QueryError::InvalidSpec {
                message: e.to_string(),
            })?;

        let predicates = raw
            .predicates
            .iter()
            .map(Predicate::from_json)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            predicates,
            order_by: raw.order_by,
            offset: raw.offset,
            limit: raw.limit,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, QueryError> {
        let value: Value = serde_json::from_str(json).map_err(|e| QueryError::InvalidSpec {
            message: e.to_string(),
        })?;
        Self::from_json(&value)
    }
}
