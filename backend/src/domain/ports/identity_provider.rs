//! Port resolving a session user id into the caller's identity.
//!
//! Credential issuance happens elsewhere; by the time a request reaches the
//! guard the session only carries a user id, and this port turns it into the
//! role-shaped [`Identity`] the checkpoints match on.

use async_trait::async_trait;

use crate::domain::{Identity, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while resolving identities.
    pub enum IdentityProviderError {
        /// The identity store could not be reached.
        Connection { message: String } => "identity lookup connection failed: {message}",
        /// The lookup failed during execution.
        Query { message: String } => "identity lookup failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve `user_id`. `None` means the account no longer exists.
    async fn resolve(&self, user_id: &UserId) -> Result<Option<Identity>, IdentityProviderError>;
}

/// Provider that resolves nobody; every guarded call is unauthenticated.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn resolve(&self, _user_id: &UserId) -> Result<Option<Identity>, IdentityProviderError> {
        Ok(None)
    }
}
