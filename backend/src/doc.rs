//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the
//! request and response schemas, and the session cookie security scheme.
//! The document backs Swagger UI in debug builds and is exported with
//! `cargo run --bin openapi-dump`.

use crate::domain::ports::UserProfile;
use crate::domain::{
    Application, ApplicationStatus, BoardEntry, CandidateApplication, CandidateCard, Company,
    CompanyOverview, ContractType, CvProfileDraft, Education, Experience, Island, Job, JobInput,
    JobListing, Notification, NotificationFeed, Role, StatusChange,
};
use crate::inbound::http::auth::{LoginRequest, SignedIn};
use crate::inbound::http::companies::CompanyRequest;
use crate::inbound::http::schemas::ErrorEnvelope;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hiring backend API",
        description = "Job postings, applications and recruiter workflow for employers in the Comoros."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_cv,
        crate::inbound::http::users::my_applications,
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::applications::update_application_status,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::companies::update_company,
        crate::inbound::http::recruiter::board,
        crate::inbound::http::recruiter::interviews,
        crate::inbound::http::recruiter::overview,
        crate::inbound::http::recruiter::list_company_jobs,
        crate::inbound::http::recruiter::create_job,
        crate::inbound::http::recruiter::update_job,
        crate::inbound::http::recruiter::delete_job,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_notification_read,
        crate::inbound::http::notifications::mark_all_notifications_read,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        LoginRequest,
        SignedIn,
        UserProfile,
        Role,
        CvProfileDraft,
        Experience,
        Education,
        Island,
        ContractType,
        Job,
        JobInput,
        JobListing,
        Company,
        CompanyRequest,
        Application,
        ApplicationStatus,
        StatusChange,
        CandidateCard,
        BoardEntry,
        CandidateApplication,
        CompanyOverview,
        Notification,
        NotificationFeed,
    )),
    tags(
        (name = "auth", description = "Development sign-in and sign-out"),
        (name = "users", description = "The caller's account, CV and applications"),
        (name = "jobs", description = "Public job listing"),
        (name = "applications", description = "Applying and moving applications along"),
        (name = "companies", description = "Employer registration"),
        (name = "recruiter", description = "Recruiter dashboard and job postings"),
        (name = "notifications", description = "The caller's inbox"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
