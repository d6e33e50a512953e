//! Candidate applications and their status workflow.
//!
//! The workflow is deliberately permissive: any status may follow any other
//! status, including itself, and no status is terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::job::UnknownTag;
use super::{ApplicationId, CompanyId, JobId, UserId};

/// Application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Initial state of every application.
    Pending,
    /// An interview is planned.
    Interview,
    /// The candidate was retained.
    Accepted,
    /// The candidate was turned down.
    Rejected,
}

impl ApplicationStatus {
    /// Board column order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Interview, Self::Accepted, Self::Rejected];

    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Interview => "INTERVIEW",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// French column label shown on the recruiter board.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Interview => "Entretien",
            Self::Accepted => "Retenu",
            Self::Rejected => "Refusé",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownTag {
                kind: "application status",
                value: s.to_owned(),
            })
    }
}

/// A candidate's application to one job.
///
/// ## Invariants
/// - at most one application exists per `(user_id, job_id)`;
/// - `interview_date` is only ever written alongside `Interview`, but it is
///   not cleared when the status later moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[schema(value_type = String, format = Uuid)]
    pub id: ApplicationId,
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
    #[schema(value_type = String, format = Uuid)]
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub interview_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// A fresh `Pending` application.
    #[must_use]
    pub const fn submitted(
        id: ApplicationId,
        user_id: UserId,
        job_id: JobId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            job_id,
            status: ApplicationStatus::Pending,
            interview_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a status change in memory, mirroring what the store persists.
    pub fn apply(&mut self, change: &StatusChange, now: DateTime<Utc>) {
        self.status = change.status;
        if let Some(date) = change.effective_interview_date() {
            self.interview_date = Some(date);
        }
        self.updated_at = now;
    }
}

/// A requested status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub interview_date: Option<DateTime<Utc>>,
}

impl StatusChange {
    /// The interview date to persist: only honoured with `Interview`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use hiring_backend::domain::{ApplicationStatus, StatusChange};
    ///
    /// let change = StatusChange {
    ///     status: ApplicationStatus::Accepted,
    ///     interview_date: Some(Utc::now()),
    /// };
    /// assert!(change.effective_interview_date().is_none());
    /// ```
    #[must_use]
    pub const fn effective_interview_date(&self) -> Option<DateTime<Utc>> {
        match self.status {
            ApplicationStatus::Interview => self.interview_date,
            _ => None,
        }
    }
}

/// An application together with the job data needed to authorise and
/// describe a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationContext {
    pub application: Application,
    pub job_title: String,
    pub company_id: CompanyId,
}

/// Candidate details shown on a board card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCard {
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
    pub display_name: String,
    pub email: String,
    pub initials: String,
    pub headline: Option<String>,
    pub skills: Option<String>,
    pub location: Option<String>,
}

/// One row of the recruiter board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    pub application: Application,
    pub job_title: String,
    pub candidate: CandidateCard,
}

/// One row of a candidate's own application list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplication {
    pub application: Application,
    pub job_title: String,
    pub company_name: String,
}

/// Recruiter dashboard figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyOverview {
    /// Job postings owned by the company.
    pub active_jobs: u64,
    /// Applications received across those postings.
    pub applications: u64,
    /// Applications currently in `Interview`.
    pub interviews: u64,
    /// Applications created since midnight UTC.
    pub new_today: u64,
}
