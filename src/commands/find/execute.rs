use std::error::Error;

use serde::Serialize;
use serde_json::Value;

use super::FindCmd;
use crate::commands::{Client, Execute};
use crate::db::Record;

/// Result of the find command
#[derive(Debug, Serialize)]
pub struct FindResult {
    pub table: String,
    pub id: Value,
    pub record: Option<Record>,
}

impl FindCmd {
    fn id_value(&self) -> Result<Value, Box<dyn Error>> {
        if !self.numeric {
            return Ok(Value::from(self.id.as_str()));
        }
        let id: i64 = self
            .id
            .parse()
            .map_err(|_| format!("Id '{}' is not an integer", self.id))?;
        Ok(Value::from(id))
    }
}

impl Execute for FindCmd {
    type Output = FindResult;

    fn execute(self, client: &Client) -> Result<Self::Output, Box<dyn Error>> {
        let id = self.id_value()?;
        let record = client.find_by_id(&self.table, id.clone())?;
        Ok(FindResult {
            table: self.table,
            id,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{rows, stub_client};
    use crate::db::StubEntry;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn client() -> Client {
        stub_client(vec![
            StubEntry::new(
                "SELECT * FROM users WHERE id = $1 LIMIT 1",
                vec![json!("1")],
                rows(json!([{"id": "1", "name": "Alice"}])),
            ),
            StubEntry::new(
                "SELECT * FROM orders WHERE id = $1 LIMIT 1",
                vec![json!(7)],
                rows(json!([{"id": 7, "total": 12.5}])),
            ),
        ])
    }

    fn find(table: &str, id: &str, numeric: bool) -> FindCmd {
        FindCmd {
            table: table.to_string(),
            id: id.to_string(),
            numeric,
        }
    }

    #[rstest]
    fn test_find_text_id(client: Client) {
        let result = find("users", "1", false).execute(&client).unwrap();
        assert_eq!(result.record.unwrap()["name"], json!("Alice"));
    }

    #[rstest]
    fn test_find_numeric_id(client: Client) {
        let result = find("orders", "7", true).execute(&client).unwrap();
        assert_eq!(result.id, json!(7));
        assert!(result.record.is_some());
    }

    #[rstest]
    fn test_find_text_id_does_not_match_numeric_entry(client: Client) {
        let result = find("orders", "7", false).execute(&client).unwrap();
        assert!(result.record.is_none());
    }

    #[rstest]
    fn test_find_numeric_id_must_parse(client: Client) {
        let err = find("orders", "seven", true).execute(&client).unwrap_err();
        assert_eq!(err.to_string(), "Id 'seven' is not an integer");
    }
}
