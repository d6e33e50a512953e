//! PostgreSQL accounts: the `UserRepository` and `IdentityProvider` ports.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, UserRepository, UserRepositoryError,
};
use crate::domain::{CompanyId, CvProfile, Email, Identity, Role, UnknownRole, User, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed account store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(error, UserRepositoryError::query, UserRepositoryError::connection)
}

fn to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from(row).map_err(|err| UserRepositoryError::query(err.to_string()))
}

fn cv_json(cv: &CvProfile) -> Result<serde_json::Value, UserRepositoryError> {
    serde_json::to_value(cv).map_err(|err| UserRepositoryError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let cv = cv_json(user.cv())?;
        let row = UserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref().to_owned(),
            display_name: user.display_name().as_ref().to_owned(),
            role: user.role().as_str().to_owned(),
            company_id: user.company_id().map(|id| *id.as_uuid()),
            cv: cv.clone(),
            phone: user.phone().map(str::to_owned),
            phone_verified: user.phone_verified(),
        };
        let update = UserUpdate {
            email: &row.email,
            display_name: &row.display_name,
            role: &row.role,
            company_id: row.company_id,
            cv: &cv,
            phone: row.phone.as_deref(),
            phone_verified: row.phone_verified,
            updated_at: Utc::now(),
        };

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_update()
            .set(&update)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update_cv(&self, id: &UserId, cv: &CvProfile) -> Result<bool, UserRepositoryError> {
        let cv = cv_json(cv)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set((users::cv.eq(cv), users::updated_at.eq(Utc::now())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }
}

#[async_trait]
impl IdentityProvider for DieselUserRepository {
    async fn resolve(&self, user_id: &UserId) -> Result<Option<Identity>, IdentityProviderError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, IdentityProviderError::connection))?;
        let row: Option<(String, Option<Uuid>)> = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select((users::role, users::company_id))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_diesel_error(
                    err,
                    IdentityProviderError::query,
                    IdentityProviderError::connection,
                )
            })?;

        row.map(|(role, company_id)| {
            let role: Role = role
                .parse()
                .map_err(|err: UnknownRole| IdentityProviderError::query(err.to_string()))?;
            Ok(Identity::from_parts(
                *user_id,
                role,
                company_id.map(CompanyId::from_uuid),
            ))
        })
        .transpose()
    }
}
