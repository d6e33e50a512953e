//! PostgreSQL-backed `JobRepository`.
//!
//! Listings join the owning company so the public board can show the
//! employer name and verification badge without a second round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{CompanyId, Job, JobFilter, JobId, JobListing};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{JobRow, JobUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{companies, jobs};

#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type ListingRow = (JobRow, String, bool);

fn pool_error(error: PoolError) -> JobRepositoryError {
    map_pool_error(error, JobRepositoryError::connection)
}

fn diesel_error(error: DieselError) -> JobRepositoryError {
    map_diesel_error(error, JobRepositoryError::query, JobRepositoryError::connection)
}

fn to_job(row: JobRow) -> Result<Job, JobRepositoryError> {
    Job::try_from(row).map_err(|err| JobRepositoryError::query(err.to_string()))
}

fn to_listing(
    (row, company_name, company_verified): ListingRow,
) -> Result<JobListing, JobRepositoryError> {
    Ok(JobListing {
        job: to_job(row)?,
        company_name,
        company_verified,
    })
}

/// `ILIKE` pattern matching `query` anywhere, with wildcards escaped.
pub(crate) fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(jobs::table)
            .values(&JobRow::from(job))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, job: &Job) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(jobs::table.filter(jobs::id.eq(job.id.as_uuid())))
            .set(&JobUpdate::from(job))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(jobs::table.filter(jobs::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        jobs::table
            .filter(jobs::id.eq(id.as_uuid()))
            .select(JobRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_job)
            .transpose()
    }

    async fn find_listing(&self, id: &JobId) -> Result<Option<JobListing>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        jobs::table
            .inner_join(companies::table)
            .filter(jobs::id.eq(id.as_uuid()))
            .select((JobRow::as_select(), companies::name, companies::is_verified))
            .first::<ListingRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_listing)
            .transpose()
    }

    async fn list_public(&self, filter: &JobFilter) -> Result<Vec<JobListing>, JobRepositoryError> {
        let mut query = jobs::table
            .inner_join(companies::table)
            .select((JobRow::as_select(), companies::name, companies::is_verified))
            .order(jobs::created_at.desc())
            .into_boxed();
        if let Some(island) = filter.island {
            query = query.filter(jobs::island.eq(island.as_str()));
        }
        if let Some(contract) = filter.contract_type {
            query = query.filter(jobs::contract_type.eq(contract.as_str()));
        }
        if let Some(text) = filter.query.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(jobs::title.ilike(contains_pattern(text)));
        }

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        query
            .load::<ListingRow>(&mut conn)
            .await
            .map_err(diesel_error)?
            .into_iter()
            .map(to_listing)
            .collect()
    }

    async fn list_for_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        jobs::table
            .filter(jobs::company_id.eq(company_id.as_uuid()))
            .order(jobs::created_at.desc())
            .select(JobRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?
            .into_iter()
            .map(to_job)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("React", "%React%")]
    #[case("100%", "%100\\%%")]
    #[case("dev_ops", "%dev\\_ops%")]
    fn search_text_is_matched_literally(#[case] query: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(query), expected);
    }
}
