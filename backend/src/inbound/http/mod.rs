//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every endpoint answers with the `{ success, data | error }` envelope.
//! Guarded endpoints resolve the session's user through
//! [`crate::domain::AuthorizationGuard`] before calling a driving port.

use actix_web::web;

pub mod applications;
pub mod auth;
pub mod companies;
pub mod envelope;
pub mod error;
pub mod health;
pub mod jobs;
pub mod notifications;
pub mod recruiter;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api/v1` endpoints on `cfg`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(users::current_user)
        .service(users::update_cv)
        .service(users::my_applications)
        .service(jobs::list_jobs)
        .service(jobs::get_job)
        .service(applications::submit_application)
        .service(applications::update_application_status)
        .service(companies::create_company)
        .service(companies::update_company)
        .service(recruiter::board)
        .service(recruiter::interviews)
        .service(recruiter::overview)
        .service(recruiter::list_company_jobs)
        .service(recruiter::create_job)
        .service(recruiter::update_job)
        .service(recruiter::delete_job)
        .service(notifications::list_notifications)
        .service(notifications::mark_all_notifications_read)
        .service(notifications::mark_notification_read);
}
