//! The caller's own account, CV and applications.
//!
//! ```text
//! GET /api/v1/users/me
//! PUT /api/v1/users/me/cv {"headline":"Développeur","experience":[...]}
//! GET /api/v1/users/me/applications
//! ```

use actix_web::{get, put, web};
use serde_json::json;

use crate::domain::ports::UserProfile;
use crate::domain::{
    ActionResponse, CandidateApplication, CvProfile, CvProfileDraft, Error, Policy,
};

use super::ApiResult;
use super::schemas::ErrorEnvelope;
use super::session::SessionContext;
use super::state::HttpState;

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Account of the caller", body = ActionResponse<UserProfile>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 404, description = "Account deleted", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<ActionResponse<UserProfile>> {
    let ports = state.get_ref();
    Ok(ports
        .guard
        .run(session.user_id()?, Policy::Authenticated, |who| {
            ports.profile.current_user(who)
        })
        .await)
}

/// Replace the caller's CV. Entries are validated before anything is stored.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/cv",
    request_body = CvProfileDraft,
    responses(
        (status = 200, description = "Updated account", body = ActionResponse<UserProfile>),
        (status = 400, description = "Invalid CV entry", body = ErrorEnvelope),
        (status = 401, description = "Not signed in", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateCv"
)]
#[put("/users/me/cv")]
pub async fn update_cv(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CvProfileDraft>,
) -> ApiResult<ActionResponse<UserProfile>> {
    let ports = state.get_ref();
    let draft = payload.into_inner();
    Ok(ports
        .guard
        .run(session.user_id()?, Policy::Authenticated, move |who| async move {
            let cv = CvProfile::try_from(draft).map_err(|err| {
                Error::invalid_request(err.to_string()).with_details(json!({ "field": "cv" }))
            })?;
            ports.profile.update_cv(who, cv).await
        })
        .await)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me/applications",
    responses(
        (status = 200, description = "Applications of the caller, newest first",
            body = ActionResponse<Vec<CandidateApplication>>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "myApplications"
)]
#[get("/users/me/applications")]
pub async fn my_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<ActionResponse<Vec<CandidateApplication>>> {
    let ports = state.get_ref();
    Ok(ports
        .guard
        .run(session.user_id()?, Policy::Authenticated, |who| {
            ports.application_query.candidate_applications(who)
        })
        .await)
}
