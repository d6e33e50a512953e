//! Authorization guard wrapping every privileged operation.
//!
//! The guard resolves the session user into an [`Identity`], checks the
//! operation's [`Policy`], runs the operation and folds the outcome into an
//! [`ActionResponse`]. Failures are logged before the message is filtered
//! through the configured [`ErrorExposure`].

use std::future::Future;
use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{ActionResponse, Error, ErrorExposure, Identity, Policy, UserId, authorize};

/// Resolves callers and enforces policies.
#[derive(Clone)]
pub struct AuthorizationGuard {
    identities: Arc<dyn IdentityProvider>,
    exposure: ErrorExposure,
}

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::Connection { message } => {
            Error::service_unavailable(format!("identity store unavailable: {message}"))
        }
        IdentityProviderError::Query { message } => {
            Error::internal(format!("identity lookup failed: {message}"))
        }
    }
}

impl AuthorizationGuard {
    pub fn new(identities: Arc<dyn IdentityProvider>, exposure: ErrorExposure) -> Self {
        Self {
            identities,
            exposure,
        }
    }

    /// Exposure applied to failures.
    #[must_use]
    pub const fn exposure(&self) -> ErrorExposure {
        self.exposure
    }

    /// Resolve the caller and check `policy`, without running anything.
    pub async fn admit(
        &self,
        session_user: Option<UserId>,
        policy: Policy,
    ) -> Result<Identity, Error> {
        let identity = match session_user {
            Some(user_id) => self
                .identities
                .resolve(&user_id)
                .await
                .map_err(map_identity_error)?,
            None => None,
        };
        authorize(identity, policy)
    }

    /// Run `action` for the caller if `policy` admits them.
    ///
    /// Every outcome, including a missing session, becomes an envelope; the
    /// action never runs unless the caller is admitted.
    pub async fn run<T, F, Fut>(
        &self,
        session_user: Option<UserId>,
        policy: Policy,
        action: F,
    ) -> ActionResponse<T>
    where
        F: FnOnce(Identity) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let outcome = match self.admit(session_user, policy).await {
            Ok(identity) => action(identity).await,
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            self.log_failure(session_user, policy, err);
        }
        ActionResponse::from_result(outcome, self.exposure)
    }

    fn log_failure(&self, session_user: Option<UserId>, policy: Policy, err: &Error) {
        let user = session_user.map(|id| id.to_string());
        if err.code().is_unexpected() {
            error!(
                code = ?err.code(),
                user = user.as_deref(),
                ?policy,
                trace_id = err.trace_id(),
                error = %err,
                "guarded action failed"
            );
        } else {
            warn!(
                code = ?err.code(),
                user = user.as_deref(),
                ?policy,
                exposure = ?self.exposure,
                reason = err.message(),
                "guarded action rejected"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::domain::ports::MockIdentityProvider;
    use crate::domain::{CompanyId, ErrorCode, Role, UNEXPECTED_ERROR};
    use rstest::rstest;

    fn guard_resolving(identity: Option<Identity>, exposure: ErrorExposure) -> AuthorizationGuard {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_resolve()
            .returning(move |_| Ok(identity));
        AuthorizationGuard::new(Arc::new(provider), exposure)
    }

    #[rstest]
    #[tokio::test]
    async fn missing_session_never_runs_the_action() {
        let guard = guard_resolving(None, ErrorExposure::Redacted);
        let ran = AtomicBool::new(false);
        let response: ActionResponse<()> = guard
            .run(None, Policy::Authenticated, |_| async {
                ran.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Authentication required"));
        assert_eq!(response.error_code(), Some(ErrorCode::Unauthorized));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[rstest]
    #[tokio::test]
    async fn deleted_account_is_unauthenticated() {
        let guard = guard_resolving(None, ErrorExposure::Redacted);
        let response: ActionResponse<()> = guard
            .run(Some(UserId::random()), Policy::Authenticated, |_| async { Ok(()) })
            .await;
        assert_eq!(response.error_code(), Some(ErrorCode::Unauthorized));
    }

    #[rstest]
    #[tokio::test]
    async fn candidate_is_refused_a_recruiter_action() {
        let user_id = UserId::random();
        let guard = guard_resolving(Some(Identity::Candidate { user_id }), ErrorExposure::Redacted);
        let ran = AtomicBool::new(false);
        let response: ActionResponse<()> = guard
            .run(Some(user_id), Policy::RequireRole(Role::Recruiter), |_| async {
                ran.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await;
        assert_eq!(response.error.as_deref(), Some("Unauthorized access"));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[rstest]
    #[tokio::test]
    async fn admitted_caller_receives_data() {
        let user_id = UserId::random();
        let identity = Identity::Recruiter {
            user_id,
            company_id: Some(CompanyId::random()),
        };
        let guard = guard_resolving(Some(identity), ErrorExposure::Redacted);
        let response = guard
            .run(Some(user_id), Policy::RequireRole(Role::Recruiter), |who| async move {
                Ok(who.user_id())
            })
            .await;
        assert!(response.success);
        assert_eq!(response.data, Some(user_id));
    }

    #[rstest]
    #[case(ErrorExposure::Redacted, UNEXPECTED_ERROR)]
    #[case(ErrorExposure::Verbose, "deadlock detected")]
    #[tokio::test]
    async fn unexpected_failures_follow_exposure(
        #[case] exposure: ErrorExposure,
        #[case] expected: &str,
    ) {
        let user_id = UserId::random();
        let guard = guard_resolving(Some(Identity::Candidate { user_id }), exposure);
        let response: ActionResponse<()> = guard
            .run(Some(user_id), Policy::Authenticated, |_| async {
                Err(Error::internal("deadlock detected"))
            })
            .await;
        assert_eq!(response.error.as_deref(), Some(expected));
    }

    #[rstest]
    #[tokio::test]
    async fn identity_store_outage_is_service_unavailable() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_resolve()
            .return_once(|_| Err(IdentityProviderError::connection("refused")));
        let guard = AuthorizationGuard::new(Arc::new(provider), ErrorExposure::Redacted);
        let response: ActionResponse<()> = guard
            .run(Some(UserId::random()), Policy::Authenticated, |_| async { Ok(()) })
            .await;
        assert_eq!(response.error_code(), Some(ErrorCode::ServiceUnavailable));
        assert_eq!(response.error.as_deref(), Some(UNEXPECTED_ERROR));
    }
}
