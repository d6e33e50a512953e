//! Extractor configuration turning malformed requests into `invalid_request`
//! envelopes instead of Actix's plain-text defaults.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Largest JSON body accepted; CVs are the biggest payload.
const JSON_LIMIT_BYTES: usize = 64 * 1024;

fn invalid(kind: &'static str, detail: &impl std::fmt::Display) -> actix_web::Error {
    debug!(kind, %detail, "rejected malformed request");
    Error::invalid_request(format!("invalid {kind}"))
        .with_details(json!({ "code": format!("invalid_{kind}"), "reason": detail.to_string() }))
        .into()
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid("body", &err)
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    invalid("path", &err)
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    invalid("query", &err)
}

#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(json_error)
}

#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}
