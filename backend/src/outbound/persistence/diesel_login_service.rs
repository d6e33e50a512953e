//! `LoginService` backed by the account table.
//!
//! Passwords are not stored here: any registered email signs in with the
//! shared development password. Deployments put a real identity provider
//! in front of the API and never expose this route.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{DEV_PASSWORD, LoginService, UserRepository};
use crate::domain::profile_service::map_user_error;
use crate::domain::{Error, LoginCredentials, UserId};

use super::diesel_user_repository::DieselUserRepository;

const INVALID_CREDENTIALS: &str = "invalid credentials";

#[derive(Clone)]
pub struct DieselLoginService {
    users: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    pub fn new(users: DieselUserRepository) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    #[cfg(test)]
    fn from_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.password() != DEV_PASSWORD {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;
        info!(user_id = %user.id(), role = user.role().as_str(), "development sign-in");
        Ok(user.id())
    }
}
