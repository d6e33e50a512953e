//! Recruiter dashboard: candidate board, interviews, figures and the
//! company's job postings.
//!
//! ```text
//! GET    /api/v1/recruiter/board
//! GET    /api/v1/recruiter/interviews
//! GET    /api/v1/recruiter/overview
//! GET    /api/v1/recruiter/jobs
//! POST   /api/v1/recruiter/jobs {"title":"Comptable Junior",...}
//! PUT    /api/v1/recruiter/jobs/{id}
//! DELETE /api/v1/recruiter/jobs/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde_json::json;

use crate::domain::{
    ActionResponse, BoardEntry, CompanyOverview, Error, Job, JobDraft, JobId, JobInput,
    JobValidationError, Policy, Role,
};

use super::ApiResult;
use super::schemas::ErrorEnvelope;
use super::session::SessionContext;
use super::state::HttpState;

const RECRUITER: Policy = Policy::RequireRole(Role::Recruiter);

fn validate_job(input: JobInput) -> Result<JobDraft, Error> {
    JobDraft::try_from(input).map_err(|err| {
        let field = match err {
            JobValidationError::TitleTooShort { .. } => "title",
            JobValidationError::DescriptionTooShort { .. } => "description",
            JobValidationError::CityTooShort { .. } => "locationCity",
            JobValidationError::NegativeSalary => "salaryKmf",
        };
        Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
    })
}

/// Every application to the company's jobs, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recruiter/board",
    responses(
        (status = 200, description = "Board snapshot", body = ActionResponse<Vec<BoardEntry>>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 403, description = "Not a recruiter, or no company", body = ErrorEnvelope)
    ),
    tags = ["recruiter"],
    operation_id = "recruiterBoard"
)]
#[get("/recruiter/board")]
pub async fn board(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<ActionResponse<Vec<BoardEntry>>> {
    let ports = state.get_ref();
    Ok(ports
        .guard
        .run(session.user_id()?, RECRUITER, |who| ports.application_query.board(who))
        .await)
}

#[utoipa::path(
    get,
    path = "/api/v1/recruiter/interviews",
    responses(
        (status = 200, description = "Applications in INTERVIEW, most recently updated first",
            body = ActionResponse<Vec<BoardEntry>>),
        (status = 403, description = "Not a recruiter, or no company", body = ErrorEnvelope)
    ),
    tags = ["recruiter"],
    operation_id = "recruiterInterviews"
)]
#[get("/recruiter/interviews")]
pub async fn interviews(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<ActionResponse<Vec<BoardEntry>>> {
    let ports = state.get_ref();
    Ok(ports
        .guard
        .run(session.user_id()?, RECRUITER, |who| {
            ports.application_query.interviews(who)
        })
        .await)
}

#[utoipa::path(
    get,
    path = "/api/v1/recruiter/overview",
    responses(
        (status = 200, description = "Dashboard figures", body = ActionResponse<CompanyOverview>),
        (status = 403, description = "Not a recruiter, or no company", body = ErrorEnvelope)
    ),
    tags = ["recruiter"],
    operation_id = "recruiterOverview"
)]
#[get("/recruiter/overview")]
pub async fn overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<ActionResponse<CompanyOverview>> {
    let ports = state.get_ref();
    Ok(ports
        .guard
        .run(session.user_id()?, RECRUITER, |who| {
            ports.application_query.overview(who)
        })
        .await)
}

#[utoipa::path(
    get,
    path = "/api/v1/recruiter/jobs",
    responses(
        (status = 200, description = "The company's postings", body = ActionResponse<Vec<Job>>),
        (status = 403, description = "Not a recruiter, or no company", body = ErrorEnvelope)
    ),
    tags = ["recruiter"],
    operation_id = "listCompanyJobs"
)]
#[get("/recruiter/jobs")]
pub async fn list_company_jobs(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<ActionResponse<Vec<Job>>> {
    let ports = state.get_ref();
    Ok(ports
        .guard
        .run(session.user_id()?, RECRUITER, |who| {
            ports.job_query.list_for_company(who)
        })
        .await)
}

#[utoipa::path(
    post,
    path = "/api/v1/recruiter/jobs",
    request_body = JobInput,
    responses(
        (status = 200, description = "Published posting", body = ActionResponse<Job>),
        (status = 400, description = "Invalid posting", body = ErrorEnvelope),
        (status = 403, description = "Not a recruiter, or no company", body = ErrorEnvelope)
    ),
    tags = ["recruiter"],
    operation_id = "createJob"
)]
#[post("/recruiter/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<JobInput>,
) -> ApiResult<ActionResponse<Job>> {
    let ports = state.get_ref();
    let input = payload.into_inner();
    Ok(ports
        .guard
        .run(session.user_id()?, RECRUITER, move |who| async move {
            let draft = validate_job(input)?;
            ports.jobs.create(who, draft).await
        })
        .await)
}

#[utoipa::path(
    put,
    path = "/api/v1/recruiter/jobs/{id}",
    params(("id" = String, Path, format = Uuid, description = "Job id")),
    request_body = JobInput,
    responses(
        (status = 200, description = "Updated posting", body = ActionResponse<Job>),
        (status = 400, description = "Invalid posting", body = ErrorEnvelope),
        (status = 403, description = "Posting of another company", body = ErrorEnvelope),
        (status = 404, description = "Posting not found", body = ErrorEnvelope)
    ),
    tags = ["recruiter"],
    operation_id = "updateJob"
)]
#[put("/recruiter/jobs/{id}")]
pub async fn update_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<JobId>,
    payload: web::Json<JobInput>,
) -> ApiResult<ActionResponse<Job>> {
    let ports = state.get_ref();
    let id = path.into_inner();
    let input = payload.into_inner();
    Ok(ports
        .guard
        .run(session.user_id()?, RECRUITER, move |who| async move {
            let draft = validate_job(input)?;
            ports.jobs.update(who, id, draft).await
        })
        .await)
}

/// Remove a posting together with its applications.
#[utoipa::path(
    delete,
    path = "/api/v1/recruiter/jobs/{id}",
    params(("id" = String, Path, format = Uuid, description = "Job id")),
    responses(
        (status = 200, description = "Deleted", body = ActionResponse<bool>),
        (status = 403, description = "Posting of another company", body = ErrorEnvelope),
        (status = 404, description = "Posting not found", body = ErrorEnvelope)
    ),
    tags = ["recruiter"],
    operation_id = "deleteJob"
)]
#[delete("/recruiter/jobs/{id}")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<JobId>,
) -> ApiResult<ActionResponse<bool>> {
    let ports = state.get_ref();
    let id = path.into_inner();
    let response = ports
        .guard
        .run(session.user_id()?, RECRUITER, |who| ports.jobs.delete(who, id))
        .await;
    Ok(response.map(|()| true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompanyId, ContractType, Identity, Island, UserId};
    use crate::inbound::http::test_utils::{TestPorts, login_request, session_cookie, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    #[fixture]
    fn recruiter() -> Identity {
        Identity::Recruiter {
            user_id: UserId::random(),
            company_id: Some(CompanyId::random()),
        }
    }

    fn posting() -> Value {
        json!({
            "title": "Comptable Junior",
            "description": "Tenue de la comptabilité générale et suivi des factures.",
            "island": "ANJOUAN",
            "locationCity": "Mutsamudu",
            "contractType": "CDD",
            "salaryKmf": 150_000
        })
    }

    fn job_from(company_id: CompanyId, draft: JobDraft) -> Job {
        Job::from_draft(JobId::random(), company_id, draft, Utc::now())
    }

    #[rstest]
    #[actix_web::test]
    async fn candidate_cannot_open_the_board() {
        let mut ports = TestPorts::signed_in(Identity::Candidate {
            user_id: UserId::random(),
        });
        ports.application_query.expect_board().never();
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/recruiter/board").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn overview_figures_are_returned(recruiter: Identity) {
        let mut ports = TestPorts::signed_in(recruiter);
        ports.application_query.expect_overview().return_once(|_| {
            Ok(CompanyOverview {
                active_jobs: 3,
                applications: 4,
                interviews: 1,
                new_today: 0,
            })
        });
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/recruiter/overview").cookie(cookie).to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": {"activeJobs": 3, "applications": 4, "interviews": 1, "newToday": 0}
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_posting_is_created(recruiter: Identity) {
        let company_id = recruiter.require_company().expect("company");
        let mut ports = TestPorts::signed_in(recruiter);
        ports
            .jobs
            .expect_create()
            .return_once(move |_, draft| Ok(job_from(company_id, draft)));
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/recruiter/jobs")
                .cookie(cookie)
                .set_json(posting())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.pointer("/data/island").and_then(Value::as_str),
            Some(Island::Anjouan.as_str())
        );
        assert_eq!(
            body.pointer("/data/contractType").and_then(Value::as_str),
            Some(ContractType::Cdd.as_str())
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn short_title_is_rejected_without_writing(recruiter: Identity) {
        let mut ports = TestPorts::signed_in(recruiter);
        ports.jobs.expect_create().never();
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let mut body = posting();
        body["title"] = json!("RH");
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/recruiter/jobs")
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case(Error::not_found("Job not found"), StatusCode::NOT_FOUND)]
    #[case(Error::forbidden("Unauthorized or job not found"), StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn delete_reports_missing_and_foreign_jobs(
        recruiter: Identity,
        #[case] error: Error,
        #[case] status: StatusCode,
    ) {
        let mut ports = TestPorts::signed_in(recruiter);
        ports.jobs.expect_delete().return_once(move |_, _| Err(error));
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/v1/recruiter/jobs/{}", JobId::random()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_confirms_success(recruiter: Identity) {
        let mut ports = TestPorts::signed_in(recruiter);
        ports.jobs.expect_delete().return_once(|_, _| Ok(()));
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/v1/recruiter/jobs/{}", JobId::random()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"success": true, "data": true}));
    }
}
