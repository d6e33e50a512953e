//! Job posting service.
//!
//! Recruiters manage postings of their own company only. Missing postings
//! are reported before ownership so a recruiter can tell a stale link from a
//! foreign one.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::application_workflow::map_job_error;
use crate::domain::ports::{JobCommand, JobQuery, JobRepository};
use crate::domain::{CompanyId, Error, Identity, Job, JobDraft, JobFilter, JobId, JobListing};

/// Message used when a posting is missing.
pub const JOB_NOT_FOUND: &str = "Job not found";

/// Implements [`JobCommand`] and [`JobQuery`].
#[derive(Clone)]
pub struct JobService<J> {
    jobs: Arc<J>,
    clock: Arc<dyn Clock>,
}

impl<J> JobService<J> {
    pub fn new(jobs: Arc<J>, clock: Arc<dyn Clock>) -> Self {
        Self { jobs, clock }
    }
}

impl<J: JobRepository> JobService<J> {
    async fn owned_job(&self, company_id: CompanyId, id: &JobId) -> Result<Job, Error> {
        let job = self
            .jobs
            .find_by_id(id)
            .await
            .map_err(map_job_error)?
            .ok_or_else(|| Error::not_found(JOB_NOT_FOUND))?;
        if job.company_id != company_id {
            return Err(Error::forbidden("Unauthorized or job not found"));
        }
        Ok(job)
    }
}

#[async_trait]
impl<J: JobRepository> JobCommand for JobService<J> {
    async fn create(&self, identity: Identity, draft: JobDraft) -> Result<Job, Error> {
        let company_id = identity.require_company()?;
        let job = Job::from_draft(JobId::random(), company_id, draft, self.clock.utc());
        self.jobs.insert(&job).await.map_err(map_job_error)?;
        info!(job_id = %job.id, %company_id, "job published");
        Ok(job)
    }

    async fn update(&self, identity: Identity, id: JobId, draft: JobDraft) -> Result<Job, Error> {
        let company_id = identity.require_company()?;
        let mut job = self.owned_job(company_id, &id).await?;
        job.apply(draft);
        let stored = self.jobs.update(&job).await.map_err(map_job_error)?;
        if !stored {
            return Err(Error::not_found(JOB_NOT_FOUND));
        }
        Ok(job)
    }

    async fn delete(&self, identity: Identity, id: JobId) -> Result<(), Error> {
        let company_id = identity.require_company()?;
        self.owned_job(company_id, &id).await?;
        let deleted = self.jobs.delete(&id).await.map_err(map_job_error)?;
        if !deleted {
            return Err(Error::not_found(JOB_NOT_FOUND));
        }
        info!(job_id = %id, %company_id, "job deleted");
        Ok(())
    }
}

#[async_trait]
impl<J: JobRepository> JobQuery for JobService<J> {
    async fn list_public(&self, filter: JobFilter) -> Result<Vec<JobListing>, Error> {
        self.jobs.list_public(&filter).await.map_err(map_job_error)
    }

    async fn get(&self, id: JobId) -> Result<JobListing, Error> {
        self.jobs
            .find_listing(&id)
            .await
            .map_err(map_job_error)?
            .ok_or_else(|| Error::not_found(JOB_NOT_FOUND))
    }

    async fn list_for_company(&self, identity: Identity) -> Result<Vec<Job>, Error> {
        let company_id = identity.require_company()?;
        self.jobs
            .list_for_company(&company_id)
            .await
            .map_err(map_job_error)
    }
}
