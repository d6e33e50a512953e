//! In-app notifications and the status-change fan-out.
//!
//! [`compose_status_notification`] is pure: it decides the text and kind of
//! the single notification a status change produces. Persisting it is the
//! workflow's job.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ApplicationStatus, NotificationId, StatusChange, UserId};

/// Notification category. Unknown tags read from storage are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    /// A recruiter changed an application's status.
    ApplicationUpdate,
    /// A recruiter scheduled an interview.
    InterviewScheduled,
    /// Any other tag.
    Other(String),
}

impl NotificationKind {
    /// Storage and wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ApplicationUpdate => "APPLICATION_UPDATE",
            Self::InterviewScheduled => "INTERVIEW_SCHEDULED",
            Self::Other(tag) => tag.as_str(),
        }
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "APPLICATION_UPDATE" => Self::ApplicationUpdate,
            "INTERVIEW_SCHEDULED" => Self::InterviewScheduled,
            _ => Self::Other(value),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(value: NotificationKind) -> Self {
        match value {
            NotificationKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale used to render dates inside notification messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    /// `dd/mm/yyyy HH:MM:SS`
    #[default]
    #[serde(rename = "fr-FR")]
    FrFr,
    /// `m/d/yyyy, h:MM:SS AM`
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// Render `instant` in this locale. Times are shown in UTC.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use hiring_backend::domain::Locale;
    ///
    /// let instant = Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap();
    /// assert_eq!(Locale::FrFr.format_datetime(instant), "03/06/2024 09:30:00");
    /// assert_eq!(Locale::EnUs.format_datetime(instant), "6/3/2024, 9:30:00 AM");
    /// ```
    #[must_use]
    pub fn format_datetime(self, instant: DateTime<Utc>) -> String {
        let pattern = match self {
            Self::FrFr => "%d/%m/%Y %H:%M:%S",
            Self::EnUs => "%-m/%-d/%Y, %-I:%M:%S %p",
        };
        instant.format(pattern).to_string()
    }
}

/// A notification ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl NewNotification {
    /// Materialise the stored form, unread.
    #[must_use]
    pub fn into_notification(self, id: NotificationId, created_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            user_id: self.user_id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            is_read: false,
            created_at,
        }
    }
}

/// Stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[schema(value_type = String, format = Uuid)]
    pub id: NotificationId,
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "APPLICATION_UPDATE")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A page of notifications plus the recipient's unread total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub items: Vec<Notification>,
    pub unread: u64,
}

/// Title used when an interview is scheduled.
pub const INTERVIEW_TITLE: &str = "Entretien Planifié !";
/// Title used for every other status change.
pub const UPDATE_TITLE: &str = "Mise à jour de candidature";

/// Decide the notification produced by a status change.
///
/// `Interview` with a date yields an `INTERVIEW_SCHEDULED` notification
/// quoting the date in `locale`; everything else, including `Interview`
/// without a date, yields an `APPLICATION_UPDATE`.
///
/// # Examples
/// ```
/// use hiring_backend::domain::{
///     compose_status_notification, ApplicationStatus, Locale, NotificationKind,
///     StatusChange, UserId,
/// };
///
/// let change = StatusChange { status: ApplicationStatus::Rejected, interview_date: None };
/// let note = compose_status_notification(UserId::random(), "Comptable", &change, Locale::FrFr);
/// assert_eq!(note.kind, NotificationKind::ApplicationUpdate);
/// assert_eq!(
///     note.message,
///     "Votre candidature pour le poste \"Comptable\" a été mise à jour."
/// );
/// ```
#[must_use]
pub fn compose_status_notification(
    recipient: UserId,
    job_title: &str,
    change: &StatusChange,
    locale: Locale,
) -> NewNotification {
    match (change.status, change.interview_date) {
        (ApplicationStatus::Interview, Some(date)) => NewNotification {
            user_id: recipient,
            title: INTERVIEW_TITLE.to_owned(),
            message: format!(
                "Un entretien a été programmé pour le poste \"{job_title}\" le {}.",
                locale.format_datetime(date)
            ),
            kind: NotificationKind::InterviewScheduled,
        },
        _ => NewNotification {
            user_id: recipient,
            title: UPDATE_TITLE.to_owned(),
            message: format!("Votre candidature pour le poste \"{job_title}\" a été mise à jour."),
            kind: NotificationKind::ApplicationUpdate,
        },
    }
}
