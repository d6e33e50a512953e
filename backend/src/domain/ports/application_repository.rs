//! Port abstraction for application persistence.
//!
//! The repository owns the one invariant the workflow cannot check on its
//! own under concurrency: at most one application per `(user_id, job_id)`.
//! Adapters report a violated uniqueness constraint as
//! [`ApplicationRepositoryError::Duplicate`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Application, ApplicationContext, ApplicationId, BoardEntry, CandidateApplication, CompanyId,
    CompanyOverview, JobId, Notification, StatusChange, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "application repository query failed: {message}",
        /// The candidate already applied to this job.
        Duplicate { user_id: UserId, job_id: JobId } =>
            "application already exists for user {user_id} and job {job_id}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// The candidate's application to `job_id`, if any.
    async fn find_for_candidate(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Store a new application.
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError>;

    /// Load an application with its job's title and owning company.
    async fn load_context(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationContext>, ApplicationRepositoryError>;

    /// Persist a status change and store its notification.
    ///
    /// Sets `status`, sets `interview_date` only when
    /// [`StatusChange::effective_interview_date`] yields one, and stamps
    /// `updated_at`. Returns `None` when the application vanished in the
    /// meantime. Adapters should perform both writes atomically.
    async fn record_status_change(
        &self,
        id: &ApplicationId,
        change: &StatusChange,
        updated_at: DateTime<Utc>,
        notification: &Notification,
    ) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// Applications to the company's jobs with candidate details, newest
    /// first.
    async fn list_board(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError>;

    /// Company applications in `Interview`, most recently updated first.
    async fn list_interviews(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError>;

    /// A candidate's own applications, newest first.
    async fn list_for_candidate(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, ApplicationRepositoryError>;

    /// Dashboard figures for a company. `since` bounds `new_today`.
    async fn overview(
        &self,
        company_id: &CompanyId,
        since: DateTime<Utc>,
    ) -> Result<CompanyOverview, ApplicationRepositoryError>;
}

/// Repository with no applications; writes are accepted and dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureApplicationRepository;

#[async_trait]
impl ApplicationRepository for FixtureApplicationRepository {
    async fn find_for_candidate(
        &self,
        _user_id: &UserId,
        _job_id: &JobId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _application: &Application) -> Result<(), ApplicationRepositoryError> {
        Ok(())
    }

    async fn load_context(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<ApplicationContext>, ApplicationRepositoryError> {
        Ok(None)
    }

    async fn record_status_change(
        &self,
        _id: &ApplicationId,
        _change: &StatusChange,
        _updated_at: DateTime<Utc>,
        _notification: &Notification,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        Ok(None)
    }

    async fn list_board(
        &self,
        _company_id: &CompanyId,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_interviews(
        &self,
        _company_id: &CompanyId,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_candidate(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, ApplicationRepositoryError> {
        Ok(Vec::new())
    }

    async fn overview(
        &self,
        _company_id: &CompanyId,
        _since: DateTime<Utc>,
    ) -> Result<CompanyOverview, ApplicationRepositoryError> {
        Ok(CompanyOverview::default())
    }
}
