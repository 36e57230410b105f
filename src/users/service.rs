//! User-facing operations over the repository, with not-found handling.

use thiserror::Error;
use tracing::info;

use super::{RepositoryError, STATUS_ACTIVE, STATUS_INACTIVE, User, UserRepository};
use crate::db::ConnectionProvider;

#[derive(Error, Debug)]
pub enum UserServiceError {
    #[error("User not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Use-case layer over `UserRepository`.
pub struct UserService<P: ConnectionProvider> {
    repository: UserRepository<P>,
}

impl<P: ConnectionProvider> UserService<P> {
    pub fn new(repository: UserRepository<P>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &UserRepository<P> {
        &self.repository
    }

    pub fn get_user(&self, id: &str) -> Result<User, UserServiceError> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| UserServiceError::NotFound { id: id.to_string() })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_email(email)?)
    }

    pub fn search_users(&self, text: &str, limit: u64) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.search_by_name(text, limit)?)
    }

    /// Save a new user with active status.
    pub fn register_user(
        &self,
        id: &str,
        name: &str,
        email: Option<&str>,
    ) -> Result<User, UserServiceError> {
        let mut user = User::new(id, name);
        user.email = email.map(str::to_string);
        user.status = STATUS_ACTIVE.to_string();

        let saved = self.repository.save(&user)?;
        info!(user_id = %saved.id, "registered user");
        Ok(saved)
    }

    pub fn rename_user(&self, id: &str, name: &str) -> Result<User, UserServiceError> {
        let mut user = self.get_user(id)?;
        user.name = name.to_string();
        Ok(self.repository.save(&user)?)
    }

    pub fn deactivate_user(&self, id: &str) -> Result<(), UserServiceError> {
        self.repository.update_status(id, STATUS_INACTIVE)?;
        info!(user_id = %id, "deactivated user");
        Ok(())
    }

    pub fn remove_user(&self, id: &str) -> Result<(), UserServiceError> {
        Ok(self.repository.delete(id)?)
    }

    pub fn active_user_count(&self) -> Result<i64, UserServiceError> {
        Ok(self.repository.count_by_status(STATUS_ACTIVE)?)
    }
}
