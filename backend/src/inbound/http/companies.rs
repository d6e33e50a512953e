//! Company registration for recruiters.
//!
//! ```text
//! POST /api/v1/companies      {"name":"Comores Telecom","sector":"Télécoms"}
//! PUT  /api/v1/companies/{id}
//! ```

use actix_web::{post, put, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    ActionResponse, Company, CompanyDraft, CompanyId, CompanyValidationError, Error, Policy, Role,
};

use super::ApiResult;
use super::schemas::ErrorEnvelope;
use super::session::SessionContext;
use super::state::HttpState;

const RECRUITER: Policy = Policy::RequireRole(Role::Recruiter);

/// Company fields as submitted.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    #[schema(example = "Comores Telecom")]
    pub name: String,
    #[schema(example = "Télécoms")]
    pub sector: String,
    /// Tax identifier.
    #[serde(default)]
    pub nif: Option<String>,
    /// Trade registry number.
    #[serde(default)]
    pub rc: Option<String>,
}

impl TryFrom<CompanyRequest> for CompanyDraft {
    type Error = Error;

    fn try_from(request: CompanyRequest) -> Result<Self, Self::Error> {
        Self::new(&request.name, &request.sector, request.nif, request.rc).map_err(|err| {
            let field = match err {
                CompanyValidationError::NameTooShort { .. } => "name",
                CompanyValidationError::SectorTooShort { .. } => "sector",
            };
            Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
        })
    }
}

/// Create a company and attach it to the calling recruiter. A recruiter
/// owns at most one company.
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = CompanyRequest,
    responses(
        (status = 200, description = "Company created, unverified", body = ActionResponse<Company>),
        (status = 400, description = "Invalid company", body = ErrorEnvelope),
        (status = 403, description = "Not a recruiter", body = ErrorEnvelope),
        (status = 409, description = "Recruiter already has a company", body = ErrorEnvelope)
    ),
    tags = ["companies"],
    operation_id = "createCompany"
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<ActionResponse<Company>> {
    let ports = state.get_ref();
    let request = payload.into_inner();
    Ok(ports
        .guard
        .run(session.user_id()?, RECRUITER, move |who| async move {
            let draft = CompanyDraft::try_from(request)?;
            ports.companies.create(who, draft).await
        })
        .await)
}

#[utoipa::path(
    put,
    path = "/api/v1/companies/{id}",
    params(("id" = String, Path, format = Uuid, description = "Company id")),
    request_body = CompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = ActionResponse<Company>),
        (status = 400, description = "Invalid company", body = ErrorEnvelope),
        (status = 403, description = "Not the recruiter's company", body = ErrorEnvelope)
    ),
    tags = ["companies"],
    operation_id = "updateCompany"
)]
#[put("/companies/{id}")]
pub async fn update_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CompanyId>,
    payload: web::Json<CompanyRequest>,
) -> ApiResult<ActionResponse<Company>> {
    let ports = state.get_ref();
    let id = path.into_inner();
    let request = payload.into_inner();
    Ok(ports
        .guard
        .run(session.user_id()?, RECRUITER, move |who| async move {
            let draft = CompanyDraft::try_from(request)?;
            ports.companies.update(who, id, draft).await
        })
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, UserId};
    use crate::inbound::http::test_utils::{TestPorts, login_request, session_cookie, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;

    fn recruiter(company_id: Option<CompanyId>) -> Identity {
        Identity::Recruiter {
            user_id: UserId::random(),
            company_id,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_the_unverified_company() {
        let mut ports = TestPorts::signed_in(recruiter(None));
        ports
            .companies
            .expect_create()
            .withf(|_, draft| draft.name() == "Comores Telecom" && draft.nif() == Some("NIF-001"))
            .return_once(|_, draft| Ok(Company::from_draft(CompanyId::random(), draft)));
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/companies")
                .cookie(cookie)
                .set_json(json!({
                    "name": "Comores Telecom",
                    "sector": "Télécoms",
                    "nif": "NIF-001"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.pointer("/data/isVerified"), Some(&Value::Bool(false)));
    }

    #[rstest]
    #[actix_web::test]
    async fn second_company_conflicts() {
        let mut ports = TestPorts::signed_in(recruiter(Some(CompanyId::random())));
        ports
            .companies
            .expect_create()
            .return_once(|_, _| Err(Error::conflict("You already have a company")));
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/companies")
                .cookie(cookie)
                .set_json(json!({"name": "Vanille Export", "sector": "Agro"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[actix_web::test]
    async fn short_name_names_the_field() {
        let mut ports = TestPorts::signed_in(recruiter(None));
        ports.companies.expect_create().never();
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/companies")
                .cookie(cookie)
                .set_json(json!({"name": "C", "sector": "Agro"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn candidates_cannot_register_companies() {
        let mut ports = TestPorts::signed_in(Identity::Candidate {
            user_id: UserId::random(),
        });
        ports.companies.expect_update().never();
        let app = test::init_service(test_app(ports)).await;
        let cookie = session_cookie(&test::call_service(&app, login_request().to_request()).await);

        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/v1/companies/{}", CompanyId::random()))
                .cookie(cookie)
                .set_json(json!({"name": "Comores Telecom", "sector": "Télécoms"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
