//! User entity: record shape, repository and service façade.

mod repository;
mod service;

pub use repository::{RepositoryError, UserRepository, USERS_TABLE};
pub use service::{UserService, UserServiceError};

use serde::{Deserialize, Serialize};

/// Status given to newly registered users.
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// A row of the `users` table.
///
/// Field order is the column order used when saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_status() -> String {
    STATUS_ACTIVE.to_string()
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            status: default_status(),
            tags: Vec::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_builder() {
        let user = User::new("1", "Alice").with_email("a@x.io").with_tags(["admin"]);
        assert_eq!(user.email.as_deref(), Some("a@x.io"));
        assert_eq!(user.tags, vec!["admin".to_string()]);
        assert!(user.is_active());
    }

    #[test]
    fn test_user_serializes_in_column_order() {
        let value = serde_json::to_value(User::new("1", "Alice")).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["id", "name", "email", "status", "tags"]);
    }

    #[test]
    fn test_user_deserializes_sparse_row() {
        let user: User = serde_json::from_value(json!({"id": "1", "name": "Alice"})).unwrap();
        assert_eq!(user, User::new("1", "Alice"));
    }
}
