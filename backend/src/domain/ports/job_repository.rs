//! Port abstraction for job posting persistence.

use async_trait::async_trait;

use crate::domain::{CompanyId, Job, JobFilter, JobId, JobListing};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "job repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Store a new posting.
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError>;

    /// Overwrite a posting. Returns `false` when it no longer exists.
    async fn update(&self, job: &Job) -> Result<bool, JobRepositoryError>;

    /// Delete a posting and, through the storage cascade, its applications.
    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError>;

    /// Fetch a posting by identifier.
    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError>;

    /// Fetch a posting with its employer's display data.
    async fn find_listing(&self, id: &JobId) -> Result<Option<JobListing>, JobRepositoryError>;

    /// Public listing, newest first.
    async fn list_public(&self, filter: &JobFilter) -> Result<Vec<JobListing>, JobRepositoryError>;

    /// A company's postings, newest first.
    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<Job>, JobRepositoryError>;
}

/// Repository with no postings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureJobRepository;

#[async_trait]
impl JobRepository for FixtureJobRepository {
    async fn insert(&self, _job: &Job) -> Result<(), JobRepositoryError> {
        Ok(())
    }

    async fn update(&self, _job: &Job) -> Result<bool, JobRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: &JobId) -> Result<bool, JobRepositoryError> {
        Ok(false)
    }

    async fn find_by_id(&self, _id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        Ok(None)
    }

    async fn find_listing(&self, _id: &JobId) -> Result<Option<JobListing>, JobRepositoryError> {
        Ok(None)
    }

    async fn list_public(
        &self,
        _filter: &JobFilter,
    ) -> Result<Vec<JobListing>, JobRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_company(
        &self,
        _company_id: &CompanyId,
    ) -> Result<Vec<Job>, JobRepositoryError> {
        Ok(Vec::new())
    }
}
