//! Driving ports for the application workflow.
//!
//! Inbound adapters call these after the authorization guard has resolved
//! the caller, so every method receives an [`Identity`] rather than a raw
//! session.

use async_trait::async_trait;

use crate::domain::{
    Application, ApplicationId, BoardEntry, CandidateApplication, CompanyOverview, Error,
    Identity, JobId, StatusChange,
};

/// Write side of the workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationCommand: Send + Sync {
    /// Apply to `job_id` as `identity`. The new application is `Pending`.
    async fn submit(&self, identity: Identity, job_id: JobId) -> Result<Application, Error>;

    /// Move an application to a new status and notify the candidate.
    async fn update_status(
        &self,
        identity: Identity,
        id: ApplicationId,
        change: StatusChange,
    ) -> Result<Application, Error>;
}

/// Read side of the workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationQuery: Send + Sync {
    /// Every application to the recruiter's company, for the board.
    async fn board(&self, identity: Identity) -> Result<Vec<BoardEntry>, Error>;

    /// Company applications currently in `Interview`.
    async fn interviews(&self, identity: Identity) -> Result<Vec<BoardEntry>, Error>;

    /// The caller's own applications.
    async fn candidate_applications(
        &self,
        identity: Identity,
    ) -> Result<Vec<CandidateApplication>, Error>;

    /// Recruiter dashboard figures.
    async fn overview(&self, identity: Identity) -> Result<CompanyOverview, Error>;
}
