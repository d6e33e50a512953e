//! HTTP mapping for domain errors.
//!
//! Errors that escape a handler, such as extractor failures or a broken
//! session cookie, are rendered with the same `{ success, error }` envelope
//! guarded operations return, so clients only ever parse one shape.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{ActionResponse, Error, ErrorCode, ErrorExposure};
use crate::middleware::TRACE_ID_HEADER;

/// Result alias for handlers that fail with a domain [`Error`].
pub type ApiResult<T> = Result<T, Error>;

pub(crate) const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        let body: ActionResponse<()> = ActionResponse::failure(self, ErrorExposure::Redacted);
        builder.json(body)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error promoted to domain error");
        Self::internal("Internal server error")
    }
}
