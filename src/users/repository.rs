//! Persistence for `User` records in the `users` table.

use serde_json::Value;
use thiserror::Error;

use super::User;
use crate::client::{ChangeListener, ClientError, DatabaseClient};
use crate::db::{ConnectionProvider, Record};
use crate::queries::{Predicate, SearchSpec, SortDirection};

pub const USERS_TABLE: &str = "users";

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Malformed user row: {message}")]
    Mapping { message: String },
}

/// Access to the `users` table.
pub struct UserRepository<P: ConnectionProvider> {
    client: DatabaseClient<P>,
}

impl<P: ConnectionProvider> UserRepository<P> {
    pub fn new(client: DatabaseClient<P>) -> Self {
        Self { client }
    }

    pub fn from_provider(provider: P) -> Self {
        Self::new(DatabaseClient::new(provider))
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) {
        self.client.subscribe(listener);
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        self.client
            .find_by_id(USERS_TABLE, id)?
            .map(record_to_user)
            .transpose()
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let spec = SearchSpec::new().filter(Predicate::equals("email", email));
        self.client
            .find_one(USERS_TABLE, &spec)?
            .map(record_to_user)
            .transpose()
    }

    pub fn find_by_ids(&self, ids: &[&str]) -> Result<Vec<User>, RepositoryError> {
        let spec = SearchSpec::new().filter(Predicate::in_list("id", ids.iter().copied()));
        self.search(&spec)
    }

    /// Case-insensitive substring match on name or email, ordered by name.
    pub fn search_by_name(&self, text: &str, limit: u64) -> Result<Vec<User>, RepositoryError> {
        let spec = SearchSpec::new()
            .filter(Predicate::text_search(["name", "email"], text))
            .order_by("name", SortDirection::Asc)
            .limit(limit);
        self.search(&spec)
    }

    pub fn find_by_tag(&self, tag: &str) -> Result<Vec<User>, RepositoryError> {
        let spec = SearchSpec::new().filter(Predicate::array_contains("tags", tag));
        self.search(&spec)
    }

    pub fn count_by_status(&self, status: &str) -> Result<i64, RepositoryError> {
        let spec = SearchSpec::new().filter(Predicate::equals("status", status));
        Ok(self.client.count(USERS_TABLE, &spec)?)
    }

    /// Insert or fully replace the user row.
    pub fn save(&self, user: &User) -> Result<User, RepositoryError> {
        self.client.save(USERS_TABLE, user_to_record(user)?)?;
        Ok(user.clone())
    }

    pub fn update_status(&self, id: &str, status: &str) -> Result<(), RepositoryError> {
        let mut changes = Record::new();
        changes.insert("status".to_string(), Value::from(status));
        self.client
            .update(USERS_TABLE, vec![Predicate::equals("id", id)], changes)?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.client
            .delete(USERS_TABLE, vec![Predicate::equals("id", id)])?;
        Ok(())
    }

    fn search(&self, spec: &SearchSpec) -> Result<Vec<User>, RepositoryError> {
        self.client
            .search(USERS_TABLE, spec)?
            .into_iter()
            .map(record_to_user)
            .collect()
    }
}

fn record_to_user(record: Record) -> Result<User, RepositoryError> {
    serde_json::from_value(Value::Object(record)).map_err(|e| RepositoryError::Mapping {
        message: e.to_string(),
    })
}

fn user_to_record(user: &User) -> Result<Record, RepositoryError> {
    match serde_json::to_value(user) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(RepositoryError::Mapping {
            message: format!("user serialized to {}", other),
        }),
        Err(e) => Err(RepositoryError::Mapping {
            message: e.to_string(),
        }),
    }
}
