//! Application workflow service.
//!
//! Submission creates a `Pending` application once per candidate and job.
//! A status update checks that the acting recruiter's company owns the job,
//! persists the change and stores exactly one notification for the
//! candidate, even when the status did not actually change.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    ApplicationCommand, ApplicationQuery, ApplicationRepository, ApplicationRepositoryError,
    JobRepository, JobRepositoryError,
};
use crate::domain::{
    Application, ApplicationId, BoardEntry, CandidateApplication, CompanyOverview, Error,
    Identity, JobId, Locale, NotificationId, StatusChange, compose_status_notification,
};

/// Message returned when a candidate applies twice to the same job.
pub const DUPLICATE_APPLICATION: &str = "Vous avez déjà postulé à cette offre.";

/// Implements [`ApplicationCommand`] and [`ApplicationQuery`].
#[derive(Clone)]
pub struct ApplicationWorkflowService<A, J> {
    applications: Arc<A>,
    jobs: Arc<J>,
    clock: Arc<dyn Clock>,
    locale: Locale,
}

impl<A, J> ApplicationWorkflowService<A, J> {
    /// Create a service rendering notification dates in `fr-FR`.
    pub fn new(applications: Arc<A>, jobs: Arc<J>, clock: Arc<dyn Clock>) -> Self {
        Self {
            applications,
            jobs,
            clock,
            locale: Locale::default(),
        }
    }

    /// Render notification dates in `locale` instead.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

pub(crate) fn map_application_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("application repository unavailable: {message}"))
        }
        ApplicationRepositoryError::Query { message } => {
            Error::internal(format!("application repository error: {message}"))
        }
        ApplicationRepositoryError::Duplicate { .. } => Error::conflict(DUPLICATE_APPLICATION),
    }
}

pub(crate) fn map_job_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("job repository unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::internal(format!("job repository error: {message}"))
        }
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

#[async_trait]
impl<A, J> ApplicationCommand for ApplicationWorkflowService<A, J>
where
    A: ApplicationRepository,
    J: JobRepository,
{
    async fn submit(&self, identity: Identity, job_id: JobId) -> Result<Application, Error> {
        let user_id = identity.user_id();
        self.jobs
            .find_by_id(&job_id)
            .await
            .map_err(map_job_error)?
            .ok_or_else(|| Error::not_found("Job not found"))?;

        let existing = self
            .applications
            .find_for_candidate(&user_id, &job_id)
            .await
            .map_err(map_application_error)?;
        if existing.is_some() {
            debug!(%user_id, %job_id, "rejecting duplicate application");
            return Err(Error::conflict(DUPLICATE_APPLICATION));
        }

        let application =
            Application::submitted(ApplicationId::random(), user_id, job_id, self.clock.utc());
        self.applications
            .insert(&application)
            .await
            .map_err(map_application_error)?;

        info!(application_id = %application.id, %user_id, %job_id, "application submitted");
        Ok(application)
    }

    async fn update_status(
        &self,
        identity: Identity,
        id: ApplicationId,
        change: StatusChange,
    ) -> Result<Application, Error> {
        let context = self
            .applications
            .load_context(&id)
            .await
            .map_err(map_application_error)?
            .ok_or_else(|| Error::not_found("Application not found"))?;

        let owns_job = match identity {
            Identity::Recruiter {
                company_id: Some(company_id),
                ..
            } => company_id == context.company_id,
            Identity::Recruiter {
                company_id: None, ..
            }
            | Identity::Candidate { .. }
            | Identity::Admin { .. } => false,
        };
        if !owns_job {
            return Err(Error::forbidden("Unauthorized access"));
        }

        let now = self.clock.utc();
        let notification = compose_status_notification(
            context.application.user_id,
            &context.job_title,
            &change,
            self.locale,
        )
        .into_notification(NotificationId::random(), now);

        let updated = self
            .applications
            .record_status_change(&id, &change, now, &notification)
            .await
            .map_err(map_application_error)?
            .ok_or_else(|| Error::not_found("Application not found"))?;

        info!(
            application_id = %id,
            from = %context.application.status,
            to = %updated.status,
            actor = %identity.user_id(),
            notification = %notification.kind,
            "application status updated"
        );
        Ok(updated)
    }
}

#[async_trait]
impl<A, J> ApplicationQuery for ApplicationWorkflowService<A, J>
where
    A: ApplicationRepository,
    J: JobRepository,
{
    async fn board(&self, identity: Identity) -> Result<Vec<BoardEntry>, Error> {
        let company_id = identity.require_company()?;
        self.applications
            .list_board(&company_id)
            .await
            .map_err(map_application_error)
    }

    async fn interviews(&self, identity: Identity) -> Result<Vec<BoardEntry>, Error> {
        let company_id = identity.require_company()?;
        self.applications
            .list_interviews(&company_id)
            .await
            .map_err(map_application_error)
    }

    async fn candidate_applications(
        &self,
        identity: Identity,
    ) -> Result<Vec<CandidateApplication>, Error> {
        self.applications
            .list_for_candidate(&identity.user_id())
            .await
            .map_err(map_application_error)
    }

    async fn overview(&self, identity: Identity) -> Result<CompanyOverview, Error> {
        let company_id = identity.require_company()?;
        self.applications
            .overview(&company_id, start_of_day(self.clock.utc()))
            .await
            .map_err(map_application_error)
    }
}

#[cfg(test)]
#[path = "application_workflow_tests.rs"]
mod tests;
