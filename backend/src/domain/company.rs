//! Employer companies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CompanyId;

/// Minimum length, in characters, of a company name and sector.
pub const COMPANY_TEXT_MIN: usize = 2;

/// Validation errors for company input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompanyValidationError {
    #[error("company name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("sector must be at least {min} characters")]
    SectorTooShort { min: usize },
}

/// Validated company fields, used for both creation and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDraft {
    name: String,
    sector: String,
    nif: Option<String>,
    rc: Option<String>,
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl CompanyDraft {
    /// Validate company input. `nif` is the tax identifier and `rc` the trade
    /// registry number; both are optional.
    pub fn new(
        name: &str,
        sector: &str,
        nif: Option<String>,
        rc: Option<String>,
    ) -> Result<Self, CompanyValidationError> {
        let name = name.trim();
        if name.chars().count() < COMPANY_TEXT_MIN {
            return Err(CompanyValidationError::NameTooShort {
                min: COMPANY_TEXT_MIN,
            });
        }
        let sector = sector.trim();
        if sector.chars().count() < COMPANY_TEXT_MIN {
            return Err(CompanyValidationError::SectorTooShort {
                min: COMPANY_TEXT_MIN,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            sector: sector.to_owned(),
            nif: optional_text(nif),
            rc: optional_text(rc),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn sector(&self) -> &str {
        &self.sector
    }

    #[must_use]
    pub fn nif(&self) -> Option<&str> {
        self.nif.as_deref()
    }

    #[must_use]
    pub fn rc(&self) -> Option<&str> {
        self.rc.as_deref()
    }
}

/// Persisted company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[schema(value_type = String, format = Uuid)]
    pub id: CompanyId,
    pub name: String,
    pub sector: String,
    pub nif: Option<String>,
    pub rc: Option<String>,
    /// Set by administrators once the registration papers are checked.
    pub is_verified: bool,
}

impl Company {
    /// Materialise a new, unverified company from a draft.
    #[must_use]
    pub fn from_draft(id: CompanyId, draft: CompanyDraft) -> Self {
        Self {
            id,
            name: draft.name,
            sector: draft.sector,
            nif: draft.nif,
            rc: draft.rc,
            is_verified: false,
        }
    }

    /// Overwrite the editable fields; verification status is preserved.
    pub fn apply(&mut self, draft: CompanyDraft) {
        self.name = draft.name;
        self.sector = draft.sector;
        self.nif = draft.nif;
        self.rc = draft.rc;
    }
}
