//! Account and CV service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ProfileCommand, UserProfile, UserRepository, UserRepositoryError};
use crate::domain::{CvProfile, Error, Identity};

/// Implements [`ProfileCommand`].
#[derive(Clone)]
pub struct ProfileService<U> {
    users: Arc<U>,
}

impl<U> ProfileService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<U: UserRepository> ProfileCommand for ProfileService<U> {
    async fn current_user(&self, identity: Identity) -> Result<UserProfile, Error> {
        self.users
            .find_by_id(&identity.user_id())
            .await
            .map_err(map_user_error)?
            .map(|user| UserProfile::from(&user))
            .ok_or_else(|| Error::not_found("User not found"))
    }

    async fn update_cv(&self, identity: Identity, cv: CvProfile) -> Result<UserProfile, Error> {
        let user_id = identity.user_id();
        let updated = self
            .users
            .update_cv(&user_id, &cv)
            .await
            .map_err(map_user_error)?;
        if !updated {
            return Err(Error::not_found("User not found"));
        }
        self.current_user(identity).await
    }
}
