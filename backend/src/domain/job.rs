//! Job postings.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CompanyId, JobId};

/// Minimum title length in characters.
pub const TITLE_MIN: usize = 5;
/// Minimum description length in characters.
pub const DESCRIPTION_MIN: usize = 50;
/// Minimum city name length in characters.
pub const CITY_MIN: usize = 2;

/// Raised when a stored enum tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! tagged_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) { $($(#[$vmeta:meta])* $variant:ident => $tag:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $tag)] $variant),+
        }

        impl $name {
            /// Storage and wire representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok(Self::$variant),)+
                    other => Err(UnknownTag { kind: $kind, value: other.to_owned() }),
                }
            }
        }
    };
}

tagged_enum!(
    /// Island of the Comoros archipelago where the job is located.
    Island("island") {
        GrandeComore => "GRANDE_COMORE",
        Anjouan => "ANJOUAN",
        Moheli => "MOHELI",
    }
);

tagged_enum!(
    /// Employment contract type.
    ContractType("contract type") {
        /// Permanent contract.
        Cdi => "CDI",
        /// Fixed-term contract.
        Cdd => "CDD",
        /// Internship.
        Stage => "STAGE",
        /// Freelance engagement.
        Prestation => "PRESTATION",
    }
);

/// Validation errors for job input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobValidationError {
    #[error("title must be at least {min} characters")]
    TitleTooShort { min: usize },
    #[error("description must be at least {min} characters")]
    DescriptionTooShort { min: usize },
    #[error("city must be at least {min} characters")]
    CityTooShort { min: usize },
    #[error("salary must not be negative")]
    NegativeSalary,
}

/// Unvalidated job fields as submitted by a recruiter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    pub title: String,
    pub description: String,
    pub island: Island,
    pub location_city: String,
    pub contract_type: ContractType,
    #[serde(default)]
    pub salary_kmf: Option<i64>,
}

/// Validated job fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    title: String,
    description: String,
    island: Island,
    location_city: String,
    contract_type: ContractType,
    salary_kmf: Option<i64>,
}

fn long_enough(text: &str, min: usize) -> bool {
    text.chars().count() >= min
}

impl TryFrom<JobInput> for JobDraft {
    type Error = JobValidationError;

    fn try_from(input: JobInput) -> Result<Self, Self::Error> {
        let title = input.title.trim();
        if !long_enough(title, TITLE_MIN) {
            return Err(JobValidationError::TitleTooShort { min: TITLE_MIN });
        }
        let description = input.description.trim();
        if !long_enough(description, DESCRIPTION_MIN) {
            return Err(JobValidationError::DescriptionTooShort {
                min: DESCRIPTION_MIN,
            });
        }
        let city = input.location_city.trim();
        if !long_enough(city, CITY_MIN) {
            return Err(JobValidationError::CityTooShort { min: CITY_MIN });
        }
        if input.salary_kmf.is_some_and(|salary| salary < 0) {
            return Err(JobValidationError::NegativeSalary);
        }
        Ok(Self {
            title: title.to_owned(),
            description: description.to_owned(),
            island: input.island,
            location_city: city.to_owned(),
            contract_type: input.contract_type,
            salary_kmf: input.salary_kmf,
        })
    }
}

/// Persisted job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[schema(value_type = String, format = Uuid)]
    pub id: JobId,
    #[schema(value_type = String, format = Uuid)]
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub island: Island,
    pub location_city: String,
    pub contract_type: ContractType,
    /// Monthly salary in Comorian francs.
    pub salary_kmf: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Materialise a new posting owned by `company_id`.
    #[must_use]
    pub fn from_draft(
        id: JobId,
        company_id: CompanyId,
        draft: JobDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            company_id,
            title: draft.title,
            description: draft.description,
            island: draft.island,
            location_city: draft.location_city,
            contract_type: draft.contract_type,
            salary_kmf: draft.salary_kmf,
            created_at,
        }
    }

    /// Overwrite the editable fields; ownership and creation time stay.
    pub fn apply(&mut self, draft: JobDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.island = draft.island;
        self.location_city = draft.location_city;
        self.contract_type = draft.contract_type;
        self.salary_kmf = draft.salary_kmf;
    }
}

/// A posting with its employer's display data, used by public listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub company_name: String,
    pub company_verified: bool,
}

/// Public listing filter. Absent fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    #[serde(default)]
    pub island: Option<Island>,
    #[serde(default)]
    pub contract_type: Option<ContractType>,
    /// Case-insensitive substring matched against the title.
    #[serde(default)]
    pub query: Option<String>,
}

impl JobFilter {
    /// Whether `job` passes the filter.
    #[must_use]
    pub fn matches(&self, job: &Job) -> bool {
        if self.island.is_some_and(|island| island != job.island) {
            return false;
        }
        if self
            .contract_type
            .is_some_and(|contract| contract != job.contract_type)
        {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => job
                .title
                .to_lowercase()
                .contains(&query.to_lowercase()),
            _ => true,
        }
    }
}
