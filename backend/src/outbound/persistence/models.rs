//! Diesel row structs and their conversions to domain types.
//!
//! Rows stay inside the persistence module. Reading a row back can fail when
//! a stored tag or address no longer parses; that surfaces as
//! [`CorruptRow`], which repositories report as a query failure.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationId, CandidateCard, Company, CompanyId, CvProfile, DisplayName, Email,
    Job, JobId, Notification, NotificationId, User, UserId,
};

use super::schema::{applications, companies, jobs, notifications, users};

/// A stored value that no longer satisfies the domain invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {table} row {id}: {reason}")]
pub(crate) struct CorruptRow {
    table: &'static str,
    id: Uuid,
    reason: String,
}

impl CorruptRow {
    fn new(table: &'static str, id: Uuid, reason: impl ToString) -> Self {
        Self {
            table,
            id,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub sector: String,
    pub nif: Option<String>,
    pub rc: Option<String>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = companies, treat_none_as_null = true)]
pub(crate) struct CompanyUpdate<'a> {
    pub name: &'a str,
    pub sector: &'a str,
    pub nif: Option<&'a str>,
    pub rc: Option<&'a str>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: CompanyId::from_uuid(row.id),
            name: row.name,
            sector: row.sector,
            nif: row.nif,
            rc: row.rc,
            is_verified: row.is_verified,
        }
    }
}

impl From<&Company> for CompanyRow {
    fn from(company: &Company) -> Self {
        Self {
            id: *company.id.as_uuid(),
            name: company.name.clone(),
            sector: company.sector.clone(),
            nif: company.nif.clone(),
            rc: company.rc.clone(),
            is_verified: company.is_verified,
        }
    }
}

impl<'a> From<&'a Company> for CompanyUpdate<'a> {
    fn from(company: &'a Company) -> Self {
        Self {
            name: &company.name,
            sector: &company.sector,
            nif: company.nif.as_deref(),
            rc: company.rc.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub company_id: Option<Uuid>,
    pub cv: serde_json::Value,
    pub phone: Option<String>,
    pub phone_verified: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub(crate) struct UserUpdate<'a> {
    pub email: &'a str,
    pub display_name: &'a str,
    pub role: &'a str,
    pub company_id: Option<Uuid>,
    pub cv: &'a serde_json::Value,
    pub phone: Option<&'a str>,
    pub phone_verified: bool,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    fn parse_cv(&self) -> Result<CvProfile, CorruptRow> {
        serde_json::from_value(self.cv.clone())
            .map_err(|err| CorruptRow::new("users", self.id, err))
    }

    /// Candidate summary shown on the recruiter board.
    pub fn into_candidate_card(self) -> Result<CandidateCard, CorruptRow> {
        let cv = self.parse_cv()?;
        let name = DisplayName::new(self.display_name.as_str())
            .map_err(|err| CorruptRow::new("users", self.id, err))?;
        Ok(CandidateCard {
            user_id: UserId::from_uuid(self.id),
            initials: name.initials(),
            display_name: name.into(),
            email: self.email,
            headline: cv.headline().map(str::to_owned),
            skills: cv.skills().map(str::to_owned),
            location: cv.location().map(str::to_owned),
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = CorruptRow;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |err: &dyn std::fmt::Display| CorruptRow::new("users", row.id, err);
        let cv = row.parse_cv()?;
        let email = Email::new(&row.email).map_err(|err| corrupt(&err))?;
        let name = DisplayName::new(row.display_name.as_str()).map_err(|err| corrupt(&err))?;
        let role = row.role.parse().map_err(|err| corrupt(&err))?;
        let user = Self::new(
            UserId::from_uuid(row.id),
            email,
            name,
            role,
            row.company_id.map(CompanyId::from_uuid),
        )
        .map_err(|err| corrupt(&err))?;
        Ok(user.with_cv(cv).with_phone(row.phone, row.phone_verified))
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub island: String,
    pub location_city: String,
    pub contract_type: String,
    pub salary_kmf: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs, treat_none_as_null = true)]
pub(crate) struct JobUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub island: &'a str,
    pub location_city: &'a str,
    pub contract_type: &'a str,
    pub salary_kmf: Option<i64>,
}

impl From<&Job> for JobRow {
    fn from(job: &Job) -> Self {
        Self {
            id: *job.id.as_uuid(),
            company_id: *job.company_id.as_uuid(),
            title: job.title.clone(),
            description: job.description.clone(),
            island: job.island.as_str().to_owned(),
            location_city: job.location_city.clone(),
            contract_type: job.contract_type.as_str().to_owned(),
            salary_kmf: job.salary_kmf,
            created_at: job.created_at,
        }
    }
}

impl<'a> From<&'a Job> for JobUpdate<'a> {
    fn from(job: &'a Job) -> Self {
        Self {
            title: &job.title,
            description: &job.description,
            island: job.island.as_str(),
            location_city: &job.location_city,
            contract_type: job.contract_type.as_str(),
            salary_kmf: job.salary_kmf,
        }
    }
}

impl TryFrom<JobRow> for Job {
    type Error = CorruptRow;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let island = row
            .island
            .parse()
            .map_err(|err| CorruptRow::new("jobs", row.id, err))?;
        let contract_type = row
            .contract_type
            .parse()
            .map_err(|err| CorruptRow::new("jobs", row.id, err))?;
        Ok(Self {
            id: JobId::from_uuid(row.id),
            company_id: CompanyId::from_uuid(row.company_id),
            title: row.title,
            description: row.description,
            island,
            location_city: row.location_city,
            contract_type,
            salary_kmf: row.salary_kmf,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub interview_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Application> for ApplicationRow {
    fn from(application: &Application) -> Self {
        Self {
            id: *application.id.as_uuid(),
            user_id: *application.user_id.as_uuid(),
            job_id: *application.job_id.as_uuid(),
            status: application.status.as_str().to_owned(),
            interview_date: application.interview_date,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

impl TryFrom<ApplicationRow> for Application {
    type Error = CorruptRow;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|err| CorruptRow::new("applications", row.id, err))?;
        Ok(Self {
            id: ApplicationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            job_id: JobId::from_uuid(row.job_id),
            status,
            interview_date: row.interview_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: *notification.id.as_uuid(),
            user_id: *notification.user_id.as_uuid(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind.as_str().to_owned(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: NotificationId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            title: row.title,
            message: row.message,
            kind: row.kind.into(),
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationStatus, ContractType, Island, NotificationKind, Role};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn candidate_row() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "ali@example.km".to_owned(),
            display_name: "Ali Soilihi".to_owned(),
            role: "CANDIDATE".to_owned(),
            company_id: None,
            cv: json!({
                "headline": "Développeur Web",
                "skills": "React, Rust",
                "experience": [],
                "education": []
            }),
            phone: Some("+269 333 00 00".to_owned()),
            phone_verified: true,
        }
    }

    #[rstest]
    fn user_rows_become_accounts(candidate_row: UserRow) {
        let user = User::try_from(candidate_row).expect("valid row");
        assert_eq!(user.role(), Role::Candidate);
        assert_eq!(user.cv().headline(), Some("Développeur Web"));
        assert_eq!(user.phone(), Some("+269 333 00 00"));
        assert!(user.phone_verified());
    }

    #[rstest]
    fn candidate_cards_carry_initials_and_cv_summary(candidate_row: UserRow) {
        let card = candidate_row.into_candidate_card().expect("valid row");
        assert_eq!(card.initials, "AS");
        assert_eq!(card.skills.as_deref(), Some("React, Rust"));
        assert_eq!(card.location, None);
    }

    #[rstest]
    fn candidate_rows_with_a_company_are_corrupt(mut candidate_row: UserRow) {
        candidate_row.company_id = Some(Uuid::new_v4());
        let err = User::try_from(candidate_row).expect_err("invariant broken");
        assert!(err.to_string().starts_with("corrupt users row"));
    }

    #[rstest]
    fn unknown_roles_are_corrupt(mut candidate_row: UserRow) {
        candidate_row.role = "SUPERUSER".to_owned();
        assert!(User::try_from(candidate_row).is_err());
    }

    #[rstest]
    fn job_rows_parse_their_tags() {
        let row = JobRow {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Développeur Fullstack React".to_owned(),
            description: "x".repeat(60),
            island: "ANJOUAN".to_owned(),
            location_city: "Mutsamudu".to_owned(),
            contract_type: "CDD".to_owned(),
            salary_kmf: Some(250_000),
            created_at: at(),
        };
        let job = Job::try_from(row.clone()).expect("valid row");
        assert_eq!(job.island, Island::Anjouan);
        assert_eq!(job.contract_type, ContractType::Cdd);
        assert_eq!(JobRow::from(&job).island, row.island);
    }

    #[rstest]
    fn unknown_application_status_is_corrupt() {
        let row = ApplicationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            status: "WITHDRAWN".to_owned(),
            interview_date: None,
            created_at: at(),
            updated_at: at(),
        };
        assert!(Application::try_from(row).is_err());
    }

    #[rstest]
    fn application_status_round_trips_through_its_tag() {
        let application = Application::submitted(
            ApplicationId::random(),
            UserId::random(),
            JobId::random(),
            at(),
        );
        let row = ApplicationRow::from(&application);
        assert_eq!(row.status, "PENDING");
        let back = Application::try_from(row).expect("valid row");
        assert_eq!(back.status, ApplicationStatus::Pending);
    }

    #[rstest]
    fn notification_rows_keep_unknown_kinds() {
        let row = NotificationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Bienvenue".to_owned(),
            message: "Bienvenue sur la plateforme.".to_owned(),
            kind: "WELCOME".to_owned(),
            is_read: false,
            created_at: at(),
        };
        let notification = Notification::from(row);
        assert_eq!(notification.kind, NotificationKind::Other("WELCOME".to_owned()));
    }
}
