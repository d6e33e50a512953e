//! Company management service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{CompanyCommand, CompanyRepository, CompanyRepositoryError};
use crate::domain::{Company, CompanyDraft, CompanyId, Error, Identity, UNAUTHORIZED_ACCESS};

/// Implements [`CompanyCommand`].
#[derive(Clone)]
pub struct CompanyService<C> {
    companies: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> CompanyService<C> {
    pub fn new(companies: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { companies, clock }
    }
}

fn map_company_error(error: CompanyRepositoryError) -> Error {
    match error {
        CompanyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("company repository unavailable: {message}"))
        }
        CompanyRepositoryError::Query { message } => {
            Error::internal(format!("company repository error: {message}"))
        }
        CompanyRepositoryError::AlreadyAttached { .. } => {
            Error::conflict("You already have a company")
        }
    }
}

#[async_trait]
impl<C: CompanyRepository> CompanyCommand for CompanyService<C> {
    async fn create(&self, identity: Identity, draft: CompanyDraft) -> Result<Company, Error> {
        let Identity::Recruiter {
            user_id,
            company_id,
        } = identity
        else {
            return Err(Error::forbidden(UNAUTHORIZED_ACCESS));
        };
        if company_id.is_some() {
            return Err(Error::conflict("You already have a company"));
        }

        let company = Company::from_draft(CompanyId::random(), draft);
        self.companies
            .create_for_recruiter(&user_id, &company, self.clock.utc())
            .await
            .map_err(map_company_error)?;
        info!(company_id = %company.id, recruiter = %user_id, "company created");
        Ok(company)
    }

    async fn update(
        &self,
        identity: Identity,
        id: CompanyId,
        draft: CompanyDraft,
    ) -> Result<Company, Error> {
        if identity.require_company()? != id {
            return Err(Error::forbidden(UNAUTHORIZED_ACCESS));
        }
        let mut company = self
            .companies
            .find_by_id(&id)
            .await
            .map_err(map_company_error)?
            .ok_or_else(|| Error::not_found("Company not found"))?;
        company.apply(draft);
        let stored = self
            .companies
            .update(&company)
            .await
            .map_err(map_company_error)?;
        if !stored {
            return Err(Error::not_found("Company not found"));
        }
        Ok(company)
    }
}
