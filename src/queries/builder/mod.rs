//! Parameterized SQL query building infrastructure.
//!
//! # Architecture
//!
//! The query building system has three layers:
//!
//! 1. **Binding** - `ParamBinder` hands out positional placeholders (`$1`, `$2`, …)
//! 2. **Predicates** - `Predicate` compiles one filter to a boolean fragment
//! 3. **Statements** - `QueryBuilder` implementations (`SelectQuery`,
//!    `UpsertQuery`, …) assemble full statements into a `CompiledQuery`
//!
//! Every statement owns exactly one binder, so placeholders are numbered
//! consecutively across the whole statement.
//!
//! # Example
//!
//! ```
//! use data_access::queries::builder::{Predicate, QueryBuilder};
//! use data_access::queries::{SearchSpec, SelectQuery};
//!
//! let spec = SearchSpec::new().filter(Predicate::equals("status", "active")).limit(10);
//! let compiled = SelectQuery::new("users", &spec).compile().unwrap();
//! assert_eq!(compiled.sql, "SELECT * FROM users WHERE status = $1 LIMIT $2");
//! ```

pub mod helpers;
pub mod params;
pub mod predicate;

pub use params::ParamBinder;
pub use predicate::Predicate;

use serde::Serialize;
use thiserror::Error;

use crate::db::Params;

/// Statement compilation errors.
///
/// These are programming errors in the caller (a malformed predicate, an
/// empty write); they are never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Unsupported predicate: {shape}")]
    UnsupportedPredicate { shape: String },

    #[error("Cannot save an empty record into '{table}'")]
    EmptyRecord { table: String },

    #[error("Update on '{table}' has no columns to set")]
    EmptyUpdate { table: String },

    #[error("Invalid search specification: {message}")]
    InvalidSpec { message: String },
}

/// A statement definition that compiles to SQL plus its bound parameters.
pub trait QueryBuilder {
    fn compile(&self) -> Result<CompiledQuery, QueryError>;
}

/// A compiled statement ready for execution.
///
/// Every `$k` in `sql` refers to `params[k - 1]`, in bind order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Params,
}

impl CompiledQuery {
    pub fn new(sql: String, binder: ParamBinder) -> Self {
        Self {
            sql,
            params: binder.into_params(),
        }
    }

    /// Get the number of parameters in this query.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal QueryBuilder for testing the trait contract
    struct LiteralQuery {
        value: i64,
    }

    impl QueryBuilder for LiteralQuery {
        fn compile(&self) -> Result<CompiledQuery, QueryError> {
            let mut binder = ParamBinder::new();
            let placeholder = binder.bind(json!(self.value));
            Ok(CompiledQuery::new(format!("SELECT {}", placeholder), binder))
        }
    }

    #[test]
    fn test_compiled_query_from_builder() {
        let compiled = LiteralQuery { value: 7 }.compile().unwrap();
        assert_eq!(compiled.sql, "SELECT $1");
        assert_eq!(compiled.params, vec![json!(7)]);
        assert_eq!(compiled.param_count(), 1);
    }

    #[test]
    fn test_query_error_messages() {
        let err = QueryError::EmptyUpdate {
            table: "users".to_string(),
        };
        assert_eq!(err.to_string(), "Update on 'users' has no columns to set");
    }
}
