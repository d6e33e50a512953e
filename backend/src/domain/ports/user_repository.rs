//! Port abstraction for account persistence.

use async_trait::async_trait;

use crate::domain::{CvProfile, Email, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account by its (normalised) e-mail address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;

    /// Insert or replace an account.
    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Replace the CV of an account. Returns `false` when the account is
    /// unknown.
    async fn update_cv(&self, id: &UserId, cv: &CvProfile) -> Result<bool, UserRepositoryError>;
}

/// Repository that knows no accounts. Used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &Email) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn upsert(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn update_cv(&self, _id: &UserId, _cv: &CvProfile) -> Result<bool, UserRepositoryError> {
        Ok(false)
    }
}
