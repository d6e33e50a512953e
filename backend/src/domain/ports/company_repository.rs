//! Port abstraction for company persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Company, CompanyId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by company repository adapters.
    pub enum CompanyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "company repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "company repository query failed: {message}",
        /// The recruiter is already attached to a company.
        AlreadyAttached { user_id: UserId } => "recruiter {user_id} already belongs to a company",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Store `company` and attach `recruiter` to it as one unit of work,
    /// stamping the recruiter's `updated_at` with `attached_at`.
    ///
    /// Fails with [`CompanyRepositoryError::AlreadyAttached`] when the
    /// recruiter already has a company; nothing is written in that case.
    async fn create_for_recruiter(
        &self,
        recruiter: &UserId,
        company: &Company,
        attached_at: DateTime<Utc>,
    ) -> Result<(), CompanyRepositoryError>;

    /// Fetch a company by identifier.
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError>;

    /// Overwrite a company's editable fields. Returns `false` when unknown.
    async fn update(&self, company: &Company) -> Result<bool, CompanyRepositoryError>;
}

/// Repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCompanyRepository;

#[async_trait]
impl CompanyRepository for FixtureCompanyRepository {
    async fn create_for_recruiter(
        &self,
        _recruiter: &UserId,
        _company: &Company,
        _attached_at: DateTime<Utc>,
    ) -> Result<(), CompanyRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        Ok(None)
    }

    async fn update(&self, _company: &Company) -> Result<bool, CompanyRepositoryError> {
        Ok(false)
    }
}
