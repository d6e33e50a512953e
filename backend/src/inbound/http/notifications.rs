//! The caller's notification inbox.
//!
//! ```text
//! GET  /api/v1/notifications?limit=20
//! POST /api/v1/notifications/{id}/read
//! POST /api/v1/notifications/read-all
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{ActionResponse, NotificationFeed, NotificationId, Policy};

use super::ApiResult;
use super::schemas::ErrorEnvelope;
use super::session::SessionContext;
use super::state::HttpState;

const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InboxQuery {
    /// Page size, clamped to 1..=100. Defaults to 20.
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    params(InboxQuery),
    responses(
        (
            status = 200,
            description = "Newest notifications and unread total",
            body = ActionResponse<NotificationFeed>
        ),
        (status = 401, description = "Not signed in", body = ErrorEnvelope)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<InboxQuery>,
) -> ApiResult<ActionResponse<NotificationFeed>> {
    let ports = state.get_ref();
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    Ok(ports
        .guard
        .run(session.user_id()?, Policy::Authenticated, |who| {
            ports.notifications.list(who, limit)
        })
        .await)
}

/// Mark one of the caller's notifications read. Another user's
/// notification is reported as missing.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = String, Path, format = Uuid, description = "Notification id")),
    responses(
        (status = 200, description = "Marked read", body = ActionResponse<bool>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope),
        (status = 404, description = "Notification not found", body = ErrorEnvelope)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[post("/notifications/{id}/read")]
pub async fn mark_notification_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<NotificationId>,
) -> ApiResult<ActionResponse<bool>> {
    let ports = state.get_ref();
    let id = path.into_inner();
    let response = ports
        .guard
        .run(session.user_id()?, Policy::Authenticated, |who| {
            ports.notifications.mark_read(who, id)
        })
        .await;
    Ok(response.map(|()| true))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/read-all",
    responses(
        (status = 200, description = "Number of notifications flipped", body = ActionResponse<u64>),
        (status = 401, description = "Not signed in", body = ErrorEnvelope)
    ),
    tags = ["notifications"],
    operation_id = "markAllNotificationsRead"
)]
#[post("/notifications/read-all")]
pub async fn mark_all_notifications_read(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<ActionResponse<u64>> {
    let ports = state.get_ref();
    Ok(ports
        .guard
        .run(session.user_id()?, Policy::Authenticated, |who| {
            ports.notifications.mark_all_read(who)
        })
        .await)
}
