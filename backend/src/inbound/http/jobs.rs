//! Public job listing. No session is needed.
//!
//! ```text
//! GET /api/v1/jobs?island=ANJOUAN&contractType=CDI&query=comptable
//! GET /api/v1/jobs/{id}
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use crate::domain::{ActionResponse, ContractType, Error, Island, JobFilter, JobId, JobListing};

use super::schemas::ErrorEnvelope;
use super::state::HttpState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct JobSearch {
    pub island: Option<Island>,
    pub contract_type: Option<ContractType>,
    /// Case-insensitive substring of the title.
    pub query: Option<String>,
}

impl From<JobSearch> for JobFilter {
    fn from(search: JobSearch) -> Self {
        Self {
            island: search.island,
            contract_type: search.contract_type,
            query: search.query,
        }
    }
}

fn respond<T>(state: &HttpState, outcome: Result<T, Error>) -> ActionResponse<T> {
    if let Some(err) = outcome.as_ref().err().filter(|err| err.code().is_unexpected()) {
        warn!(code = ?err.code(), error = %err, "public job read failed");
    }
    ActionResponse::from_result(outcome, state.guard.exposure())
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    params(JobSearch),
    responses(
        (
            status = 200,
            description = "Matching postings, newest first",
            body = ActionResponse<Vec<JobListing>>
        ),
        (status = 400, description = "Unknown island or contract type", body = ErrorEnvelope)
    ),
    tags = ["jobs"],
    operation_id = "listJobs",
    security([])
)]
#[get("/jobs")]
pub async fn list_jobs(
    state: web::Data<HttpState>,
    search: web::Query<JobSearch>,
) -> ActionResponse<Vec<JobListing>> {
    let outcome = state.job_query.list_public(search.into_inner().into()).await;
    respond(&state, outcome)
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, format = Uuid, description = "Job id")),
    responses(
        (
            status = 200,
            description = "Posting with employer details",
            body = ActionResponse<JobListing>
        ),
        (status = 404, description = "Posting not found", body = ErrorEnvelope)
    ),
    tags = ["jobs"],
    operation_id = "getJob",
    security([])
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    path: web::Path<JobId>,
) -> ActionResponse<JobListing> {
    let outcome = state.job_query.get(path.into_inner()).await;
    respond(&state, outcome)
}
