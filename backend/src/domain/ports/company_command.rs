//! Driving port for company management.

use async_trait::async_trait;

use crate::domain::{Company, CompanyDraft, CompanyId, Error, Identity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyCommand: Send + Sync {
    /// Create a company and attach the calling recruiter to it.
    async fn create(&self, identity: Identity, draft: CompanyDraft) -> Result<Company, Error>;

    /// Edit the calling recruiter's own company.
    async fn update(
        &self,
        identity: Identity,
        id: CompanyId,
        draft: CompanyDraft,
    ) -> Result<Company, Error>;
}
