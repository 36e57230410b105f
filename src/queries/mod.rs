//! Statement compilation.
//!
//! `builder` holds the binding and predicate machinery; the sibling modules
//! each compile one statement kind from a table name and its inputs.

pub mod builder;
pub mod count;
pub mod delete;
pub mod search;
pub mod select;
pub mod update;
pub mod upsert;

pub use builder::{CompiledQuery, Predicate, QueryBuilder, QueryError};
pub use count::{extract_count, CountQuery};
pub use delete::DeleteQuery;
pub use search::{OrderBy, SearchSpec, SortDirection};
pub use select::SelectQuery;
pub use update::UpdateQuery;
pub use upsert::UpsertQuery;
