//! PostgreSQL-backed `CompanyRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{CompanyRepository, CompanyRepositoryError};
use crate::domain::{Company, CompanyId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CompanyRow, CompanyUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{companies, users};

#[derive(Clone)]
pub struct DieselCompanyRepository {
    pool: DbPool,
}

impl DieselCompanyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CompanyRepositoryError {
    map_pool_error(error, CompanyRepositoryError::connection)
}

fn diesel_error(error: DieselError) -> CompanyRepositoryError {
    map_diesel_error(error, CompanyRepositoryError::query, CompanyRepositoryError::connection)
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    /// Insert the company and attach the recruiter in one transaction.
    ///
    /// The attachment only matches a recruiter row whose `company_id` is
    /// still null; when it matches nothing the insert is rolled back.
    async fn create_for_recruiter(
        &self,
        recruiter: &UserId,
        company: &Company,
        attached_at: DateTime<Utc>,
    ) -> Result<(), CompanyRepositoryError> {
        let row = CompanyRow::from(company);
        let recruiter_id = *recruiter.as_uuid();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let outcome = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    diesel::insert_into(companies::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    let attached = diesel::update(
                        users::table
                            .filter(users::id.eq(recruiter_id))
                            .filter(users::company_id.is_null()),
                    )
                    .set((users::company_id.eq(row.id), users::updated_at.eq(attached_at)))
                    .execute(conn)
                    .await?;
                    if attached == 0 {
                        return Err(DieselError::RollbackTransaction);
                    }
                    Ok(())
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Err(DieselError::RollbackTransaction) => {
                Err(CompanyRepositoryError::already_attached(*recruiter))
            }
            other => other.map_err(diesel_error),
        }
    }

    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = companies::table
            .filter(companies::id.eq(id.as_uuid()))
            .select(CompanyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Company::from))
    }

    async fn update(&self, company: &Company) -> Result<bool, CompanyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let target = companies::table.filter(companies::id.eq(company.id.as_uuid()));
        let updated = diesel::update(target)
            .set(&CompanyUpdate::from(company))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }
}
