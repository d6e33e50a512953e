//! Application submission and recruiter status changes.
//!
//! ```text
//! POST  /api/v1/jobs/{id}/applications
//! PATCH /api/v1/applications/{id}/status
//!       {"status":"INTERVIEW","interviewDate":"2024-06-03T09:00:00Z"}
//! ```

use actix_web::{patch, post, web};

use crate::domain::{
    ActionResponse, Application, ApplicationId, JobId, Policy, Role, StatusChange,
};

use super::ApiResult;
use super::schemas::ErrorEnvelope;
use super::session::SessionContext;
use super::state::HttpState;

/// Apply to a job. Any signed-in account may apply once per job.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/{id}/applications",
    params(("id" = String, Path, format = Uuid, description = "Job id")),
    responses(
        (status = 200, description = "Pending application", body = ActionResponse<Application>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 404, description = "Job not found", body = ErrorEnvelope),
        (status = 409, description = "Already applied", body = ErrorEnvelope)
    ),
    tags = ["applications"],
    operation_id = "submitApplication"
)]
#[post("/jobs/{id}/applications")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<JobId>,
) -> ApiResult<ActionResponse<Application>> {
    let ports = state.get_ref();
    let job_id = path.into_inner();
    Ok(ports
        .guard
        .run(session.user_id()?, Policy::Authenticated, |who| {
            ports.applications.submit(who, job_id)
        })
        .await)
}

/// Move an application to another status and notify the candidate.
///
/// Every call stores one notification, even when the status is unchanged.
#[utoipa::path(
    patch,
    path = "/api/v1/applications/{id}/status",
    params(("id" = String, Path, format = Uuid, description = "Application id")),
    request_body = StatusChange,
    responses(
        (status = 200, description = "Updated application", body = ActionResponse<Application>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 403, description = "Not a recruiter of the owning company", body = ErrorEnvelope),
        (status = 404, description = "Application not found", body = ErrorEnvelope)
    ),
    tags = ["applications"],
    operation_id = "updateApplicationStatus"
)]
#[patch("/applications/{id}/status")]
pub async fn update_application_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ApplicationId>,
    payload: web::Json<StatusChange>,
) -> ApiResult<ActionResponse<Application>> {
    let ports = state.get_ref();
    let id = path.into_inner();
    let change = payload.into_inner();
    Ok(ports
        .guard
        .run(
            session.user_id()?,
            Policy::RequireRole(Role::Recruiter),
            |who| ports.applications.update_status(who, id, change),
        )
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ApplicationStatus, CompanyId, DUPLICATE_APPLICATION, Error, Identity, UserId,
    };
    use crate::inbound::http::test_utils::{TestPorts, login_request, session_cookie, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn pending(user_id: UserId, job_id: JobId) -> Application {
        let now = Utc
            .with_ymd_and_hms(2024, 5, 2, 8, 0, 0)
            .single()
            .expect("timestamp");
        Application::submitted(ApplicationId::random(), user_id, job_id, now)
    }

    #[rstest]
    #[actix_web::test]
    async fn candidate_submits_once() {
        let user_id = UserId::random();
        let job_id = JobId::random();
        let mut ports = TestPorts::signed_in(Identity::Candidate { user_id });
        ports
            .applications
            .expect_submit()
            .withf(move |who, job| who.user_id() == user_id && *job == job_id)
            .return_once(move |_, _| Ok(pending(user_id, job_id)));
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/jobs/{job_id}/applications"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.pointer("/data/status").and_then(Value::as_str), Some("PENDING"));
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_submission_is_a_conflict() {
        let user_id = UserId::random();
        let mut ports = TestPorts::signed_in(Identity::Candidate { user_id });
        ports
            .applications
            .expect_submit()
            .return_once(|_, _| Err(Error::conflict(DUPLICATE_APPLICATION)));
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/jobs/{}/applications", JobId::random()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"success": false, "error": DUPLICATE_APPLICATION}));
    }

    #[rstest]
    #[actix_web::test]
    async fn candidate_cannot_change_a_status() {
        let mut ports = TestPorts::signed_in(Identity::Candidate {
            user_id: UserId::random(),
        });
        ports.applications.expect_update_status().never();
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/v1/applications/{}/status", ApplicationId::random()))
                .cookie(cookie)
                .set_json(json!({"status": "ACCEPTED"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("error").and_then(Value::as_str), Some("Unauthorized access"));
    }

    #[rstest]
    #[actix_web::test]
    async fn recruiter_schedules_an_interview() {
        let recruiter = Identity::Recruiter {
            user_id: UserId::random(),
            company_id: Some(CompanyId::random()),
        };
        let id = ApplicationId::random();
        let mut ports = TestPorts::signed_in(recruiter);
        ports
            .applications
            .expect_update_status()
            .withf(move |_, got, change| {
                *got == id
                    && change.status == ApplicationStatus::Interview
                    && change.effective_interview_date().is_some()
            })
            .return_once(move |_, _, change| {
                let mut application = pending(UserId::random(), JobId::random());
                application.apply(&change, Utc::now());
                Ok(application)
            });
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/v1/applications/{id}/status"))
                .cookie(cookie)
                .set_json(json!({"status": "INTERVIEW", "interviewDate": "2024-06-03T09:00:00Z"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.pointer("/data/status").and_then(Value::as_str), Some("INTERVIEW"));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_status_is_a_bad_request() {
        let mut ports = TestPorts::signed_in(Identity::Recruiter {
            user_id: UserId::random(),
            company_id: Some(CompanyId::random()),
        });
        ports.applications.expect_update_status().never();
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/v1/applications/{}/status", ApplicationId::random()))
                .cookie(cookie)
                .set_json(json!({"status": "HIRED"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
