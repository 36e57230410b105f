//! End-to-end tests through a stub registry file.
//!
//! Exercises the public API the way a consumer would: load a registry from
//! disk, open it by URL, and drive the client, repository and service.

use std::io::Write;
use std::sync::{Arc, Mutex};

use data_access::client::{ChangeEvent, DatabaseClient, RecordingListener};
use data_access::db::{ConnectionProvider, StubProvider, normalize_query, open_db};
use data_access::queries::{Predicate, QueryBuilder, SearchSpec, UpdateQuery, UpsertQuery};
use data_access::users::{User, UserRepository, UserService, UserServiceError};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::NamedTempFile;

const REGISTRY: &str = r#"[
  {
    "query": "SELECT * FROM users WHERE id = $1 LIMIT 1",
    "params": ["1"],
    "result": {"rows": [{"id": "1", "name": "Alice"}]}
  },
  {
    "query": "SELECT *\n   FROM users\n  WHERE status = $1\n  ORDER BY name ASC",
    "params": ["active"],
    "result": {"rows": [{"id": "1", "name": "Alice"}, {"id": "3", "name": "Carol"}]}
  },
  {
    "query": "SELECT * FROM users WHERE status = $1 ORDER BY name ASC",
    "params": ["active"],
    "result": {"rows": [{"id": "shadowed", "name": "Never returned"}]}
  },
  {
    "query": "SELECT COUNT(*) AS cnt FROM users WHERE status = $1",
    "params": ["active"],
    "result": {"rows": [{"cnt": 2}]}
  },
  {
    "query": "SELECT * FROM orders WHERE id = $1 LIMIT 1",
    "params": [1],
    "result": {"rows": [{"id": 1, "total": 9.5}]}
  }
]"#;

fn registry_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[fixture]
fn registry() -> NamedTempFile {
    registry_file(REGISTRY)
}

fn client_for(file: &NamedTempFile) -> DatabaseClient<Box<dyn ConnectionProvider>> {
    let url = format!("stub://{}", file.path().display());
    DatabaseClient::new(open_db(&url).expect("registry should load"))
}

#[rstest]
fn find_by_id_hit_and_miss(registry: NamedTempFile) {
    let client = client_for(&registry);

    let found = client.find_by_id("users", "1").unwrap();
    assert_eq!(Value::Object(found.unwrap()), json!({"id": "1", "name": "Alice"}));

    // An unmatched statement is a soft miss, not an error.
    assert_eq!(client.find_by_id("users", "2").unwrap(), None);
}

#[rstest]
fn registry_whitespace_is_normalized_and_first_match_wins(registry: NamedTempFile) {
    let client = client_for(&registry);
    let spec = SearchSpec::new()
        .filter(Predicate::equals("status", "active"))
        .order_by("name", data_access::queries::SortDirection::Asc);

    let rows = client.search("users", &spec).unwrap();
    let ids: Vec<&Value> = rows.iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, [&json!("1"), &json!("3")]);
}

#[rstest]
fn params_compare_structurally(registry: NamedTempFile) {
    let client = client_for(&registry);
    assert!(client.find_by_id("orders", 1).unwrap().is_some());
    assert!(client.find_by_id("orders", "1").unwrap().is_none());
}

#[rstest]
fn count_reads_cnt_and_defaults_to_zero(registry: NamedTempFile) {
    let client = client_for(&registry);
    let active = SearchSpec::matching(vec![Predicate::equals("status", "active")]);
    let banned = SearchSpec::matching(vec![Predicate::equals("status", "banned")]);

    assert_eq!(client.count("users", &active).unwrap(), 2);
    assert_eq!(client.count("users", &banned).unwrap(), 0);
}

#[rstest]
fn empty_in_list_reaches_provider_unchanged() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    struct Spy(Arc<Mutex<Vec<String>>>);
    impl ConnectionProvider for Spy {
        fn execute(
            &self,
            sql: &str,
            _params: &[Value],
        ) -> Result<data_access::db::QueryResult, data_access::db::DbError> {
            self.0.lock().unwrap().push(sql.to_string());
            Ok(data_access::db::QueryResult::empty())
        }

        fn backend_name(&self) -> &'static str {
            "Spy"
        }
    }

    let client = DatabaseClient::new(Spy(seen.clone()));
    let spec = SearchSpec::from_json(&json!({"where": [{"in": {"column": "status", "values": []}}]}))
        .unwrap();
    assert!(client.search("t", &spec).unwrap().is_empty());
    assert_eq!(*seen.lock().unwrap(), ["SELECT * FROM t WHERE status IN ()"]);
}

#[test]
fn compiled_statements_normalize_idempotently() {
    let record = json!({"id": "1", "name": "Alice"});
    let upsert = UpsertQuery::new("users", record.as_object().unwrap())
        .compile()
        .unwrap();
    assert_eq!(
        upsert.sql,
        "INSERT INTO users (id, name) VALUES ($1, $2) \
         ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id, name = EXCLUDED.name"
    );

    let update = json!({"b": 2, "a": 1});
    let filter = [Predicate::equals("id", "1")];
    let update = UpdateQuery::new("users", &filter, update.as_object().unwrap())
        .compile()
        .unwrap();
    assert_eq!(update.sql, "UPDATE users SET a = $1, b = $2 WHERE id = $3");

    for sql in [&upsert.sql, &update.sql] {
        let once = normalize_query(sql);
        assert_eq!(normalize_query(&once), once);
    }
}

#[rstest]
fn service_flow_emits_events_in_order(registry: NamedTempFile) {
    let provider = StubProvider::from_file(registry.path()).unwrap();
    let recorder = RecordingListener::new();
    let mut repository = UserRepository::from_provider(provider);
    repository.subscribe(recorder.clone());
    let service = UserService::new(repository);

    assert_eq!(service.get_user("1").unwrap(), User::new("1", "Alice"));
    assert!(matches!(
        service.get_user("2"),
        Err(UserServiceError::NotFound { .. })
    ));

    service.register_user("9", "Ivan", None).unwrap();
    service.rename_user("1", "Alicia").unwrap();
    service.deactivate_user("9").unwrap();
    service.remove_user("9").unwrap();

    let events = recorder.events();
    let kinds: Vec<&str> = events.iter().map(ChangeEvent::kind).collect();
    assert_eq!(kinds, ["saved", "saved", "updated", "deleted"]);
    assert!(events.iter().all(|e| e.table() == "users"));

    let payload = serde_json::to_value(&events[3]).unwrap();
    assert_eq!(
        payload,
        json!({
            "event": "deleted",
            "table": "users",
            "filter": [{"equals": {"column": "id", "value": "9"}}]
        })
    );
}

#[test]
fn malformed_registry_is_a_load_error() {
    let file = registry_file("{\"query\": 1}");
    let url = format!("stub://{}", file.path().display());
    let err = open_db(&url).err().expect("load should fail");
    assert!(err.to_string().starts_with("Failed to load stub registry"));
}
