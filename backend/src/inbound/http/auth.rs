//! Development sign-in and sign-out.
//!
//! ```text
//! POST /api/v1/login {"email":"recruteur@comorestelecom.km","password":"password"}
//! POST /api/v1/logout
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{ActionResponse, Error, LoginCredentials, LoginValidationError, UserId};

use super::ApiResult;
use super::schemas::ErrorEnvelope;
use super::session::SessionContext;
use super::state::HttpState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::InvalidEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Authenticate and start a cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ActionResponse<SignedIn>,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed credentials", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<ActionResponse<SignedIn>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|err| map_login_validation_error(&err))?;
    let outcome = state
        .login
        .authenticate(&credentials)
        .await
        .and_then(|user_id| {
            session.persist_user(&user_id)?;
            Ok(SignedIn { user_id })
        });
    if let Err(err) = &outcome {
        warn!(code = ?err.code(), reason = err.message(), "sign-in refused");
    }
    Ok(ActionResponse::from_result(outcome, state.guard.exposure()))
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 200, description = "Signed out", body = ActionResponse<bool>)),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ActionResponse<bool> {
    session.clear();
    ActionResponse::ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, Identity};
    use crate::inbound::http::test_utils::{TestPorts, login_request, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[actix_web::test]
    async fn valid_credentials_set_a_session() {
        let user_id = UserId::random();
        let ports = TestPorts::signed_in(Identity::Candidate { user_id });
        let app = test::init_service(test_app(ports)).await;
        let res = test::call_service(&app, login_request().to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.response().cookies().any(|c| c.name() == "session"));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body.pointer("/data/userId").and_then(Value::as_str),
            Some(user_id.to_string().as_str())
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_credentials_are_unauthorized() {
        let mut ports = TestPorts::anonymous();
        ports
            .login
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));
        let app = test::init_service(test_app(ports)).await;
        let res = test::call_service(&app, login_request().to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(!res.response().cookies().any(|c| c.name() == "session"));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({"success": false, "error": "invalid credentials"}));
    }

    #[rstest]
    #[case("not-an-email", "password")]
    #[case("ali@example.km", "")]
    #[actix_web::test]
    async fn malformed_credentials_never_reach_the_service(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let mut ports = TestPorts::anonymous();
        ports.login.expect_authenticate().never();
        let app = test::init_service(test_app(ports)).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(LoginRequest {
                email: email.to_owned(),
                password: password.to_owned(),
            })
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[::core::prelude::v1::test]
    fn validation_errors_name_the_field() {
        let err = map_login_validation_error(&LoginValidationError::EmptyPassword);
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&serde_json::json!({"field": "password"})));
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_clears_the_cookie() {
        let app = test::init_service(test_app(TestPorts::signed_in(Identity::Candidate {
            user_id: UserId::random(),
        })))
        .await;
        let res = test::call_service(&app, login_request().to_request()).await;
        let cookie = crate::inbound::http::test_utils::session_cookie(&res);
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/v1/logout").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let removal = res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("removal cookie");
        assert!(removal.value().is_empty());
    }
}
