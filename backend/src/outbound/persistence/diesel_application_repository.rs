//! PostgreSQL-backed `ApplicationRepository`.
//!
//! The `applications_user_job_key` unique constraint backs the one
//! application per candidate and job rule; a violation on insert becomes
//! [`ApplicationRepositoryError::Duplicate`]. Status changes and the
//! notification they produce commit in the same transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{
    Application, ApplicationContext, ApplicationId, ApplicationStatus, BoardEntry,
    CandidateApplication, CompanyId, CompanyOverview, JobId, Notification, StatusChange, UserId,
};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{ApplicationRow, CorruptRow, NotificationRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{applications, companies, jobs, notifications, users};

const USER_JOB_CONSTRAINT: &str = "applications_user_job_key";

#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load_board(
        &self,
        company_id: &CompanyId,
        interviews_only: bool,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError> {
        let mut query = applications::table
            .inner_join(jobs::table)
            .inner_join(users::table)
            .filter(jobs::company_id.eq(*company_id.as_uuid()))
            .select((ApplicationRow::as_select(), jobs::title, UserRow::as_select()))
            .into_boxed();
        query = if interviews_only {
            query
                .filter(applications::status.eq(ApplicationStatus::Interview.as_str()))
                .order(applications::updated_at.desc())
        } else {
            query.order(applications::created_at.desc())
        };

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        query
            .load::<(ApplicationRow, String, UserRow)>(&mut conn)
            .await
            .map_err(diesel_error)?
            .into_iter()
            .map(|(application, job_title, candidate)| {
                Ok(BoardEntry {
                    application: to_application(application)?,
                    job_title,
                    candidate: candidate.into_candidate_card().map_err(corrupt)?,
                })
            })
            .collect()
    }
}

fn pool_error(error: PoolError) -> ApplicationRepositoryError {
    map_pool_error(error, ApplicationRepositoryError::connection)
}

fn diesel_error(error: DieselError) -> ApplicationRepositoryError {
    map_diesel_error(
        error,
        ApplicationRepositoryError::query,
        ApplicationRepositoryError::connection,
    )
}

fn corrupt(error: CorruptRow) -> ApplicationRepositoryError {
    ApplicationRepositoryError::query(error.to_string())
}

fn to_application(row: ApplicationRow) -> Result<Application, ApplicationRepositoryError> {
    Application::try_from(row).map_err(corrupt)
}

#[expect(clippy::cast_sign_loss, reason = "COUNT(*) is never negative")]
const fn count(value: i64) -> u64 {
    value as u64
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn find_for_candidate(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        applications::table
            .filter(applications::user_id.eq(user_id.as_uuid()))
            .filter(applications::job_id.eq(job_id.as_uuid()))
            .select(ApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_application)
            .transpose()
    }

    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        match diesel::insert_into(applications::table)
            .values(&ApplicationRow::from(application))
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err, USER_JOB_CONSTRAINT) => {
                debug!(
                    user_id = %application.user_id,
                    job_id = %application.job_id,
                    "duplicate application rejected by constraint"
                );
                Err(ApplicationRepositoryError::duplicate(
                    application.user_id,
                    application.job_id,
                ))
            }
            Err(err) => Err(diesel_error(err)),
        }
    }

    async fn load_context(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationContext>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<(ApplicationRow, String, Uuid)> = applications::table
            .inner_join(jobs::table)
            .filter(applications::id.eq(id.as_uuid()))
            .select((ApplicationRow::as_select(), jobs::title, jobs::company_id))
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|(application, job_title, company_id)| {
            Ok(ApplicationContext {
                application: to_application(application)?,
                job_title,
                company_id: CompanyId::from_uuid(company_id),
            })
        })
        .transpose()
    }

    async fn record_status_change(
        &self,
        id: &ApplicationId,
        change: &StatusChange,
        updated_at: DateTime<Utc>,
        notification: &Notification,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let application_id = *id.as_uuid();
        let status = change.status.as_str();
        let interview_date = change.effective_interview_date();
        let notification_row = NotificationRow::from(notification);
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let target = applications::table.filter(applications::id.eq(application_id));
                    let row = match interview_date {
                        Some(date) => {
                            diesel::update(target)
                                .set((
                                    applications::status.eq(status),
                                    applications::interview_date.eq(date),
                                    applications::updated_at.eq(updated_at),
                                ))
                                .returning(ApplicationRow::as_returning())
                                .get_result(conn)
                                .await
                        }
                        None => {
                            diesel::update(target)
                                .set((
                                    applications::status.eq(status),
                                    applications::updated_at.eq(updated_at),
                                ))
                                .returning(ApplicationRow::as_returning())
                                .get_result(conn)
                                .await
                        }
                    }
                    .optional()?;

                    if row.is_some() {
                        diesel::insert_into(notifications::table)
                            .values(&notification_row)
                            .execute(conn)
                            .await?;
                    }
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        updated.map(to_application).transpose()
    }

    async fn list_board(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError> {
        self.load_board(company_id, false).await
    }

    async fn list_interviews(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<BoardEntry>, ApplicationRepositoryError> {
        self.load_board(company_id, true).await
    }

    async fn list_for_candidate(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CandidateApplication>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        applications::table
            .inner_join(jobs::table.inner_join(companies::table))
            .filter(applications::user_id.eq(user_id.as_uuid()))
            .order(applications::created_at.desc())
            .select((ApplicationRow::as_select(), jobs::title, companies::name))
            .load::<(ApplicationRow, String, String)>(&mut conn)
            .await
            .map_err(diesel_error)?
            .into_iter()
            .map(|(application, job_title, company_name)| {
                Ok(CandidateApplication {
                    application: to_application(application)?,
                    job_title,
                    company_name,
                })
            })
            .collect()
    }

    async fn overview(
        &self,
        company_id: &CompanyId,
        since: DateTime<Utc>,
    ) -> Result<CompanyOverview, ApplicationRepositoryError> {
        let company = *company_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let active_jobs: i64 = jobs::table
            .filter(jobs::company_id.eq(company))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let received = || {
            applications::table
                .inner_join(jobs::table)
                .filter(jobs::company_id.eq(company))
        };
        let total: i64 = received()
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let interviews: i64 = received()
            .filter(applications::status.eq(ApplicationStatus::Interview.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let new_today: i64 = received()
            .filter(applications::created_at.ge(since))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(CompanyOverview {
            active_jobs: count(active_jobs),
            applications: count(total),
            interviews: count(interviews),
            new_today: count(new_today),
        })
    }
}
