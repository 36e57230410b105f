//! Connection provider construction.

use super::backend::ConnectionProvider;
use super::config::DatabaseConfig;
use super::stub::{StubEntry, StubProvider};
use super::DbError;

/// Open a provider from a database URL (see `DatabaseConfig::from_url`).
pub fn open_db(url: &str) -> Result<Box<dyn ConnectionProvider>, DbError> {
    DatabaseConfig::from_url(url)?.connect()
}

/// Create the "null" provider: a stub answering only the given entries.
///
/// Used for tests to run the full client stack without a database server.
pub fn open_null_db(entries: Vec<StubEntry>) -> StubProvider {
    StubProvider::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::QueryResult;
    use serde_json::json;

    #[test]
    fn test_open_db_memory() {
        let provider = open_db(":memory:").unwrap();
        assert_eq!(provider.backend_name(), "Stub");
        assert!(provider.execute("SELECT 1", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_open_db_invalid_url() {
        assert!(open_db("ftp://nope").is_err());
    }

    #[test]
    fn test_open_null_db() {
        let provider = open_null_db(vec![StubEntry::new(
            "SELECT 1",
            vec![],
            QueryResult::from(vec![json!({"x": 1}).as_object().unwrap().clone()]),
        )]);
        assert_eq!(provider.execute("SELECT 1", &[]).unwrap().len(), 1);
    }
}
