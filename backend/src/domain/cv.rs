//! Candidate CV profile.
//!
//! Work history and education are typed records validated once at the
//! boundary; storage keeps them as JSON documents on the user row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation failures for CV input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CvValidationError {
    /// A required text field of a work-history entry was blank.
    #[error("experience #{index}: {field} must not be empty")]
    BlankExperienceField {
        /// Zero-based position in the submitted list.
        index: usize,
        /// Offending field name.
        field: &'static str,
    },
    /// A work-history entry ends before it starts.
    #[error("experience #{index}: end date precedes start date")]
    ExperienceEndsBeforeStart {
        /// Zero-based position in the submitted list.
        index: usize,
    },
    /// A required text field of an education entry was blank.
    #[error("education #{index}: {field} must not be empty")]
    BlankEducationField {
        /// Zero-based position in the submitted list.
        index: usize,
        /// Offending field name.
        field: &'static str,
    },
    /// An education entry ends before it starts.
    #[error("education #{index}: end date precedes start date")]
    EducationEndsBeforeStart {
        /// Zero-based position in the submitted list.
        index: usize,
    },
}

/// One work-history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Employer name.
    pub company: String,
    /// Position held.
    pub role: String,
    /// First day in the role.
    pub from: NaiveDate,
    /// Last day in the role; absent while ongoing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    /// School or university.
    pub institution: String,
    /// Degree or diploma.
    pub degree: String,
    /// Start date.
    pub from: NaiveDate,
    /// Graduation date, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

/// Unvalidated CV payload as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvProfileDraft {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
}

/// Validated CV profile.
///
/// ## Invariants
/// - optional text fields are trimmed; blank input is stored as absent;
/// - every experience and education entry names its organisation and title;
/// - no entry ends before it starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", try_from = "CvProfileDraft")]
pub struct CvProfile {
    headline: Option<String>,
    summary: Option<String>,
    skills: Option<String>,
    location: Option<String>,
    experience: Vec<Experience>,
    education: Vec<Education>,
}

fn normalise(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn require_text(value: &mut String) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.len() != value.len() {
        *value = trimmed.to_owned();
    }
    true
}

fn validate_experience(
    index: usize,
    mut entry: Experience,
) -> Result<Experience, CvValidationError> {
    if !require_text(&mut entry.company) {
        return Err(CvValidationError::BlankExperienceField {
            index,
            field: "company",
        });
    }
    if !require_text(&mut entry.role) {
        return Err(CvValidationError::BlankExperienceField {
            index,
            field: "role",
        });
    }
    if entry.to.is_some_and(|to| to < entry.from) {
        return Err(CvValidationError::ExperienceEndsBeforeStart { index });
    }
    entry.description = normalise(entry.description);
    Ok(entry)
}

fn validate_education(index: usize, mut entry: Education) -> Result<Education, CvValidationError> {
    if !require_text(&mut entry.institution) {
        return Err(CvValidationError::BlankEducationField {
            index,
            field: "institution",
        });
    }
    if !require_text(&mut entry.degree) {
        return Err(CvValidationError::BlankEducationField {
            index,
            field: "degree",
        });
    }
    if entry.to.is_some_and(|to| to < entry.from) {
        return Err(CvValidationError::EducationEndsBeforeStart { index });
    }
    Ok(entry)
}

impl TryFrom<CvProfileDraft> for CvProfile {
    type Error = CvValidationError;

    fn try_from(draft: CvProfileDraft) -> Result<Self, Self::Error> {
        let experience = draft
            .experience
            .into_iter()
            .enumerate()
            .map(|(index, entry)| validate_experience(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        let education = draft
            .education
            .into_iter()
            .enumerate()
            .map(|(index, entry)| validate_education(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            headline: normalise(draft.headline),
            summary: normalise(draft.summary),
            skills: normalise(draft.skills),
            location: normalise(draft.location),
            experience,
            education,
        })
    }
}

impl CvProfile {
    /// Short professional headline.
    #[must_use]
    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    /// Longer free-text summary.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Skills as typed by the candidate.
    #[must_use]
    pub fn skills(&self) -> Option<&str> {
        self.skills.as_deref()
    }

    /// Where the candidate is based.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Work history in submission order.
    #[must_use]
    pub fn experience(&self) -> &[Experience] {
        &self.experience
    }

    /// Education in submission order.
    #[must_use]
    pub fn education(&self) -> &[Education] {
        &self.education
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[fixture]
    fn draft() -> CvProfileDraft {
        CvProfileDraft {
            headline: Some("  Développeur React  ".to_owned()),
            summary: Some("   ".to_owned()),
            skills: Some("React, Node.js".to_owned()),
            location: None,
            experience: vec![Experience {
                company: "Comores Telecom".to_owned(),
                role: "Stagiaire".to_owned(),
                from: date(2022, 1, 10),
                to: Some(date(2022, 6, 30)),
                description: Some(String::new()),
            }],
            education: vec![Education {
                institution: "Université des Comores".to_owned(),
                degree: "Licence Informatique".to_owned(),
                from: date(2018, 9, 1),
                to: None,
            }],
        }
    }

    #[rstest]
    fn valid_draft_is_normalised(draft: CvProfileDraft) {
        let profile = CvProfile::try_from(draft).expect("valid profile");
        assert_eq!(profile.headline(), Some("Développeur React"));
        assert_eq!(profile.summary(), None);
        assert_eq!(profile.experience().len(), 1);
        assert_eq!(
            profile.experience().first().and_then(|e| e.description.clone()),
            None
        );
    }

    #[rstest]
    fn experience_ending_before_it_starts_is_rejected(mut draft: CvProfileDraft) {
        if let Some(entry) = draft.experience.first_mut() {
            entry.to = Some(date(2021, 1, 1));
        }
        assert_eq!(
            CvProfile::try_from(draft),
            Err(CvValidationError::ExperienceEndsBeforeStart { index: 0 })
        );
    }

    #[rstest]
    fn blank_degree_is_rejected(mut draft: CvProfileDraft) {
        if let Some(entry) = draft.education.first_mut() {
            entry.degree = "  ".to_owned();
        }
        assert_eq!(
            CvProfile::try_from(draft),
            Err(CvValidationError::BlankEducationField {
                index: 0,
                field: "degree"
            })
        );
    }

    #[rstest]
    fn deserialising_validates_entries() {
        let payload = serde_json::json!({
            "experience": [{"company": "", "role": "Dev", "from": "2020-01-01"}]
        });
        assert!(serde_json::from_value::<CvProfile>(payload).is_err());
    }
}
