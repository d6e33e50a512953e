//! Driving ports for job postings.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Job, JobDraft, JobFilter, JobId, JobListing};

/// Recruiter-side job management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobCommand: Send + Sync {
    /// Publish a posting for the recruiter's company.
    async fn create(&self, identity: Identity, draft: JobDraft) -> Result<Job, Error>;

    /// Edit one of the company's postings.
    async fn update(&self, identity: Identity, id: JobId, draft: JobDraft) -> Result<Job, Error>;

    /// Remove one of the company's postings with its applications.
    async fn delete(&self, identity: Identity, id: JobId) -> Result<(), Error>;
}

/// Job reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobQuery: Send + Sync {
    /// Public listing; no session required.
    async fn list_public(&self, filter: JobFilter) -> Result<Vec<JobListing>, Error>;

    /// Public detail; no session required.
    async fn get(&self, id: JobId) -> Result<JobListing, Error>;

    /// The recruiter's company postings.
    async fn list_for_company(&self, identity: Identity) -> Result<Vec<Job>, Error>;
}
