//! Platform roles and the resolved caller identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tracing::debug;

use super::{CompanyId, Error, UNAUTHORIZED_ACCESS, UserId};

/// Role attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Job seeker. Never attached to a company.
    Candidate,
    /// Employer-side user, optionally attached to one company.
    Recruiter,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "CANDIDATE",
            Self::Recruiter => "RECRUITER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CANDIDATE" => Ok(Self::Candidate),
            "RECRUITER" => Ok(Self::Recruiter),
            "ADMIN" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// The authenticated caller, resolved from the session.
///
/// The variants carry exactly the data each role may use, so checkpoints
/// match on the variant rather than comparing role strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    /// A job seeker.
    Candidate {
        /// Account id.
        user_id: UserId,
    },
    /// A recruiter, possibly not yet attached to a company.
    Recruiter {
        /// Account id.
        user_id: UserId,
        /// Employer the recruiter acts for.
        company_id: Option<CompanyId>,
    },
    /// A platform administrator.
    Admin {
        /// Account id.
        user_id: UserId,
    },
}

impl Identity {
    /// Build the identity for an account. A candidate's company is ignored.
    #[must_use]
    pub const fn from_parts(user_id: UserId, role: Role, company_id: Option<CompanyId>) -> Self {
        match role {
            Role::Candidate => Self::Candidate { user_id },
            Role::Recruiter => Self::Recruiter {
                user_id,
                company_id,
            },
            Role::Admin => Self::Admin { user_id },
        }
    }

    /// Account id of the caller.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        match self {
            Self::Candidate { user_id }
            | Self::Recruiter { user_id, .. }
            | Self::Admin { user_id } => *user_id,
        }
    }

    /// Role of the caller.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Candidate { .. } => Role::Candidate,
            Self::Recruiter { .. } => Role::Recruiter,
            Self::Admin { .. } => Role::Admin,
        }
    }

    /// The recruiter's company, or `Forbidden` when the caller has none.
    ///
    /// # Examples
    /// ```
    /// use hiring_backend::domain::{CompanyId, Identity, UserId};
    ///
    /// let recruiter = Identity::Recruiter {
    ///     user_id: UserId::random(),
    ///     company_id: None,
    /// };
    /// assert!(recruiter.require_company().is_err());
    /// ```
    pub fn require_company(&self) -> Result<CompanyId, Error> {
        match self {
            Self::Recruiter {
                company_id: Some(company_id),
                ..
            } => Ok(*company_id),
            Self::Recruiter {
                user_id,
                company_id: None,
            } => {
                debug!(%user_id, "recruiter is not attached to a company");
                Err(Error::forbidden(UNAUTHORIZED_ACCESS))
            }
            Self::Candidate { .. } | Self::Admin { .. } => {
                Err(Error::forbidden(UNAUTHORIZED_ACCESS))
            }
        }
    }
}
