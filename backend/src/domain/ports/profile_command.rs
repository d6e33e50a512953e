//! Driving port for the caller's own account and CV.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{CompanyId, CvProfile, Error, Identity, Role, User, UserId};

/// Account view returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(value_type = String, format = Uuid)]
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[schema(value_type = Option<String>, format = Uuid)]
    pub company_id: Option<CompanyId>,
    pub cv: CvProfile,
    pub phone: Option<String>,
    pub phone_verified: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().to_string(),
            display_name: user.display_name().to_string(),
            role: user.role(),
            company_id: user.company_id(),
            cv: user.cv().clone(),
            phone: user.phone().map(str::to_owned),
            phone_verified: user.phone_verified(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// The caller's account.
    async fn current_user(&self, identity: Identity) -> Result<UserProfile, Error>;

    /// Replace the caller's CV.
    async fn update_cv(&self, identity: Identity, cv: CvProfile) -> Result<UserProfile, Error>;
}
