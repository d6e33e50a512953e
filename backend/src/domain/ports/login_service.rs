//! Driving port for the development sign-in flow.
//!
//! Production credentials are issued by an external identity provider; this
//! port only exists so local environments and tests can obtain a session.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Shared development password accepted by the fixture and Diesel services.
pub const DEV_PASSWORD: &str = "password";

/// Authenticator without an account store: it only accepts one fixed
/// recruiter account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

/// Account id returned by [`FixtureLoginService`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
/// Account e-mail accepted by [`FixtureLoginService`].
pub const FIXTURE_EMAIL: &str = "recruteur@example.km";

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.email().as_ref() != FIXTURE_EMAIL || credentials.password() != DEV_PASSWORD {
            return Err(Error::unauthorized("invalid credentials"));
        }
        FIXTURE_USER_ID
            .parse()
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }
}
