//! Actix rendering of [`ActionResponse`].
//!
//! The body is always the envelope; the status mirrors the error category so
//! generic HTTP tooling still sees failures.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::Serialize;

use crate::domain::ActionResponse;

use super::error::status_for;

impl<T: Serialize> Responder for ActionResponse<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let status = self.error_code().map_or(StatusCode::OK, status_for);
        HttpResponse::build(status).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, ErrorExposure};
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn render<T: Serialize>(envelope: ActionResponse<T>) -> (StatusCode, Value) {
        let req = TestRequest::default().to_http_request();
        let response = envelope.respond_to(&req);
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[rstest]
    #[actix_web::test]
    async fn success_is_ok_with_data() {
        let (status, body) = render(ActionResponse::ok(json!({"unread": 2}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "data": {"unread": 2}}));
    }

    #[rstest]
    #[case(Error::unauthorized("Authentication required"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("Unauthorized access"), StatusCode::FORBIDDEN)]
    #[case(Error::conflict("Vous avez déjà postulé à cette offre."), StatusCode::CONFLICT)]
    #[case(Error::internal("deadlock"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[actix_web::test]
    async fn failure_status_follows_the_code(#[case] error: Error, #[case] expected: StatusCode) {
        let envelope: ActionResponse<()> = ActionResponse::failure(&error, ErrorExposure::Verbose);
        let (status, body) = render(envelope).await;
        assert_eq!(status, expected);
        assert_eq!(body.get("success"), Some(&Value::Bool(false)));
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some(error.message())
        );
    }
}
