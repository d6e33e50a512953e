//! Domain primitives, aggregates and services.
//!
//! Purpose: define the recruitment workflow independently of HTTP and
//! storage. Types validate their invariants on construction; services
//! implement the driving ports in [`ports`] on top of the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Identity / Role / Policy: who is calling and what they may do.
//! - Application / StatusChange: the status workflow.
//! - compose_status_notification: the notification fan-out.
//! - AuthorizationGuard / ActionResponse: uniform guarded execution.

pub mod application;
pub mod application_workflow;
pub mod auth;
pub mod authorization;
pub mod company;
pub mod company_service;
pub mod cv;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod ids;
pub mod job;
pub mod job_service;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod profile_service;
pub mod role;
mod trace_id;
pub mod user;

pub use self::application::{
    Application, ApplicationContext, ApplicationStatus, BoardEntry, CandidateApplication,
    CandidateCard, CompanyOverview, StatusChange,
};
pub use self::application_workflow::{ApplicationWorkflowService, DUPLICATE_APPLICATION};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::authorization::{AUTHENTICATION_REQUIRED, Policy, UNAUTHORIZED_ACCESS, authorize};
pub use self::company::{Company, CompanyDraft, CompanyValidationError};
pub use self::company_service::CompanyService;
pub use self::cv::{CvProfile, CvProfileDraft, CvValidationError, Education, Experience};
pub use self::envelope::{ActionResponse, ErrorExposure, UNEXPECTED_ERROR};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::guard::AuthorizationGuard;
pub use self::ids::{ApplicationId, CompanyId, JobId, NotificationId, UserId};
pub use self::job::{
    ContractType, Island, Job, JobDraft, JobFilter, JobInput, JobListing, JobValidationError,
    UnknownTag,
};
pub use self::job_service::JobService;
pub use self::notification::{
    Locale, NewNotification, Notification, NotificationFeed, NotificationKind,
    compose_status_notification,
};
pub use self::notification_service::NotificationService;
pub use self::profile_service::ProfileService;
pub use self::role::{Identity, Role, UnknownRole};
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, Email, User, UserValidationError};
