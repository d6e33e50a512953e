//! Access policies checked before every privileged operation.

use super::{Error, Identity, Role};

/// Message returned when no session user could be resolved.
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";
/// Message returned when the caller's role does not satisfy the policy.
pub const UNAUTHORIZED_ACCESS: &str = "Unauthorized access";

/// What an operation requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Any signed-in account.
    Authenticated,
    /// A signed-in account with exactly this role.
    RequireRole(Role),
}

/// Check `identity` against `policy`.
///
/// # Examples
/// ```
/// use hiring_backend::domain::{authorize, Identity, Policy, Role, UserId};
///
/// let candidate = Identity::Candidate { user_id: UserId::random() };
/// assert!(authorize(Some(candidate), Policy::Authenticated).is_ok());
/// assert!(authorize(Some(candidate), Policy::RequireRole(Role::Recruiter)).is_err());
/// assert!(authorize(None, Policy::Authenticated).is_err());
/// ```
pub fn authorize(identity: Option<Identity>, policy: Policy) -> Result<Identity, Error> {
    let Some(identity) = identity else {
        return Err(Error::unauthorized(AUTHENTICATION_REQUIRED));
    };
    match policy {
        Policy::Authenticated => Ok(identity),
        Policy::RequireRole(required) => match (required, identity) {
            (Role::Candidate, Identity::Candidate { .. })
            | (Role::Recruiter, Identity::Recruiter { .. })
            | (Role::Admin, Identity::Admin { .. }) => Ok(identity),
            (Role::Candidate | Role::Recruiter | Role::Admin, _) => {
                Err(Error::forbidden(UNAUTHORIZED_ACCESS))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompanyId, ErrorCode, UserId};
    use rstest::rstest;

    fn recruiter() -> Identity {
        Identity::Recruiter {
            user_id: UserId::random(),
            company_id: Some(CompanyId::random()),
        }
    }

    fn candidate() -> Identity {
        Identity::Candidate {
            user_id: UserId::random(),
        }
    }

    fn admin() -> Identity {
        Identity::Admin {
            user_id: UserId::random(),
        }
    }

    #[rstest]
    #[case(recruiter(), Role::Recruiter, None)]
    #[case(candidate(), Role::Recruiter, Some(ErrorCode::Forbidden))]
    #[case(admin(), Role::Recruiter, Some(ErrorCode::Forbidden))]
    #[case(candidate(), Role::Candidate, None)]
    #[case(admin(), Role::Admin, None)]
    fn role_policies(
        #[case] identity: Identity,
        #[case] role: Role,
        #[case] expected: Option<ErrorCode>,
    ) {
        let outcome = authorize(Some(identity), Policy::RequireRole(role));
        assert_eq!(outcome.err().map(|err| err.code()), expected);
    }

    #[rstest]
    fn missing_identity_is_unauthorised_for_every_policy() {
        for policy in [Policy::Authenticated, Policy::RequireRole(Role::Admin)] {
            let err = authorize(None, policy).expect_err("no identity");
            assert_eq!(err.code(), ErrorCode::Unauthorized);
            assert_eq!(err.message(), AUTHENTICATION_REQUIRED);
        }
    }

    #[rstest]
    fn forbidden_message_is_generic() {
        let err = authorize(Some(candidate()), Policy::RequireRole(Role::Recruiter))
            .expect_err("candidate is not a recruiter");
        assert_eq!(err.message(), UNAUTHORIZED_ACCESS);
    }
}
