//! Generic table access over a connection provider.
//!
//! `DatabaseClient` compiles each call into one parameterized statement and
//! executes it through its `ConnectionProvider`. It holds no cross-call state
//! besides its listener list, so concurrent calls on a shared client are
//! independent.

mod events;

pub use events::{ChangeEvent, ChangeListener, RecordingListener};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::db::{ConnectionProvider, DbError, QueryResult, Record};
use crate::queries::builder::helpers::format_params_debug;
use crate::queries::{
    extract_count, CompiledQuery, CountQuery, DeleteQuery, Predicate, QueryBuilder, QueryError,
    SearchSpec, SelectQuery, UpdateQuery, UpsertQuery,
};

/// Errors from a client call: either the statement didn't compile or the
/// provider failed to execute it.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Compile(#[from] QueryError),

    #[error(transparent)]
    Execute(#[from] DbError),
}

pub struct DatabaseClient<P: ConnectionProvider> {
    provider: P,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl<P: ConnectionProvider> DatabaseClient<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for post-write events.
    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch the row whose `id` equals `id`.
    pub fn find_by_id(&self, table: &str, id: impl Into<Value>) -> Result<Option<Record>, ClientError> {
        let spec = SearchSpec::new().filter(Predicate::equals("id", id));
        self.find_one(table, &spec)
    }

    /// Fetch the first row matching `spec`. Absent is `Ok(None)`, not an error.
    pub fn find_one(&self, table: &str, spec: &SearchSpec) -> Result<Option<Record>, ClientError> {
        let compiled = SelectQuery::single(table, spec).compile()?;
        Ok(self.run(&compiled)?.into_first())
    }

    pub fn search(&self, table: &str, spec: &SearchSpec) -> Result<Vec<Record>, ClientError> {
        let compiled = SelectQuery::new(table, spec).compile()?;
        Ok(self.run(&compiled)?.rows)
    }

    /// Count rows matching the spec's predicates. Ordering and pagination are ignored.
    pub fn count(&self, table: &str, spec: &SearchSpec) -> Result<i64, ClientError> {
        let compiled = CountQuery::new(table, &spec.predicates).compile()?;
        Ok(extract_count(&self.run(&compiled)?))
    }

    /// Insert or fully replace the row keyed by the record's `id`.
    pub fn save(&self, table: &str, record: Record) -> Result<QueryResult, ClientError> {
        let compiled = UpsertQuery::new(table, &record).compile()?;
        let result = self.run(&compiled)?;
        self.notify(ChangeEvent::Saved {
            table: table.to_string(),
            record,
        });
        Ok(result)
    }

    /// Set the given columns on every row matching `filter`.
    pub fn update(
        &self,
        table: &str,
        filter: Vec<Predicate>,
        update: Record,
    ) -> Result<QueryResult, ClientError> {
        let compiled = UpdateQuery::new(table, &filter, &update).compile()?;
        let result = self.run(&compiled)?;
        self.notify(ChangeEvent::Updated {
            table: table.to_string(),
            filter,
            update,
        });
        Ok(result)
    }

    pub fn delete(&self, table: &str, filter: Vec<Predicate>) -> Result<QueryResult, ClientError> {
        let compiled = DeleteQuery::new(table, &filter).compile()?;
        let result = self.run(&compiled)?;
        self.notify(ChangeEvent::Deleted {
            table: table.to_string(),
            filter,
        });
        Ok(result)
    }

    fn run(&self, compiled: &CompiledQuery) -> Result<QueryResult, DbError> {
        debug!(
            backend = self.provider.backend_name(),
            sql = %compiled.sql,
            param_count = compiled.param_count(),
            params = %format_params_debug(&compiled.params),
            "executing statement"
        );
        self.provider.execute(&compiled.sql, &compiled.params)
    }

    fn notify(&self, event: ChangeEvent) {
        for listener in &self.listeners {
            listener.on_change(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{StubEntry, StubProvider};
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::sync::Mutex;

    fn rows(value: Value) -> QueryResult {
        serde_json::from_value(json!({ "rows": value })).unwrap()
    }

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    /// Provider that records every statement and answers with fixed rows.
    #[derive(Default)]
    struct CapturingProvider {
        calls: Mutex<Vec<(String, Vec<Value>)>>,
        response: QueryResult,
    }

    impl CapturingProvider {
        fn calls(&self) -> Vec<(String, Vec<Value>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ConnectionProvider for CapturingProvider {
        fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError> {
            self.calls.lock().unwrap().push((sql.to_string(), params.to_vec()));
            Ok(self.response.clone())
        }

        fn backend_name(&self) -> &'static str {
            "Capturing"
        }
    }

    struct FailingProvider;

    impl ConnectionProvider for FailingProvider {
        fn execute(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult, DbError> {
            Err(DbError::QueryFailed {
                message: "connection reset".to_string(),
            })
        }

        fn backend_name(&self) -> &'static str {
            "Failing"
        }
    }

    #[fixture]
    fn alice_client() -> DatabaseClient<StubProvider> {
        DatabaseClient::new(StubProvider::new(vec![StubEntry::new(
            "SELECT * FROM users WHERE id = $1 LIMIT 1",
            vec![json!("1")],
            rows(json!([{"id": "1", "name": "Alice"}])),
        )]))
    }

    #[rstest]
    fn test_find_by_id_hit(alice_client: DatabaseClient<StubProvider>) {
        let found = alice_client.find_by_id("users", "1").unwrap();
        assert_eq!(found, Some(record(json!({"id": "1", "name": "Alice"}))));
    }

    #[rstest]
    fn test_find_by_id_miss_is_none(alice_client: DatabaseClient<StubProvider>) {
        let found = alice_client.find_by_id("users", "2").unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_search_compiles_spec() {
        let client = DatabaseClient::new(CapturingProvider::default());
        let spec = SearchSpec::from_json(&json!({
            "where": [{"in": {"column": "status", "values": []}}]
        }))
        .unwrap();

        let found = client.search("t", &spec).unwrap();
        assert!(found.is_empty());
        assert_eq!(
            client.provider().calls(),
            vec![("SELECT * FROM t WHERE status IN ()".to_string(), vec![])]
        );
    }

    #[test]
    fn test_count_reads_cnt() {
        let client = DatabaseClient::new(CapturingProvider {
            response: rows(json!([{"cnt": 5}])),
            ..Default::default()
        });
        let spec = SearchSpec::new()
            .filter(Predicate::equals("status", "active"))
            .limit(1);

        assert_eq!(client.count("users", &spec).unwrap(), 5);
        assert_eq!(
            client.provider().calls()[0].0,
            "SELECT COUNT(*) AS cnt FROM users WHERE status = $1"
        );
    }

    #[test]
    fn test_count_defaults_to_zero() {
        let client = DatabaseClient::new(StubProvider::default());
        assert_eq!(client.count("users", &SearchSpec::new()).unwrap(), 0);
    }

    #[test]
    fn test_save_notifies_with_record() {
        let mut client = DatabaseClient::new(CapturingProvider::default());
        let recorder = RecordingListener::new();
        client.subscribe(recorder.clone());

        let rec = record(json!({"id": "1", "name": "Alice"}));
        client.save("users", rec.clone()).unwrap();

        assert_eq!(
            recorder.events(),
            vec![ChangeEvent::Saved {
                table: "users".to_string(),
                record: rec
            }]
        );
    }

    #[test]
    fn test_update_and_delete_notify_in_order() {
        let mut client = DatabaseClient::new(CapturingProvider::default());
        let recorder = RecordingListener::new();
        client.subscribe(recorder.clone());

        let filter = vec![Predicate::equals("id", "1")];
        let changes = record(json!({"name": "Al"}));
        client.update("users", filter.clone(), changes.clone()).unwrap();
        client.delete("users", filter.clone()).unwrap();

        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            ChangeEvent::Updated {
                table: "users".to_string(),
                filter: filter.clone(),
                update: changes
            }
        );
        assert_eq!(
            events[1],
            ChangeEvent::Deleted {
                table: "users".to_string(),
                filter
            }
        );
    }

    #[test]
    fn test_all_listeners_run_in_registration_order() {
        let mut client = DatabaseClient::new(CapturingProvider::default());
        let order = std::sync::Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let order = order.clone();
            client.subscribe(move |_: &ChangeEvent| order.lock().unwrap().push(name));
        }

        client.delete("users", vec![]).unwrap();
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_failed_write_does_not_notify() {
        let mut client = DatabaseClient::new(FailingProvider);
        let recorder = RecordingListener::new();
        client.subscribe(recorder.clone());

        let result = client.save("users", record(json!({"id": "1"})));
        assert!(matches!(result, Err(ClientError::Execute(DbError::QueryFailed { .. }))));
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_compile_error_never_reaches_provider() {
        let mut client = DatabaseClient::new(CapturingProvider::default());
        let recorder = RecordingListener::new();
        client.subscribe(recorder.clone());

        let result = client.update("users", vec![], Record::new());
        assert!(matches!(result, Err(ClientError::Compile(QueryError::EmptyUpdate { .. }))));
        assert!(client.provider().calls().is_empty());
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_execution_error_propagates_on_read() {
        let client = DatabaseClient::new(FailingProvider);
        let err = client.find_by_id("users", "1").unwrap_err();
        assert_eq!(err.to_string(), "Query failed: connection reset");
    }

    #[test]
    fn test_boxed_provider() {
        let provider: Box<dyn ConnectionProvider> = Box::new(StubProvider::default());
        let client = DatabaseClient::new(provider);
        assert!(client.search("users", &SearchSpec::new()).unwrap().is_empty());
    }
}
