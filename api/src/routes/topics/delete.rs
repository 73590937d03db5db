use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error_response};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::topic as topic_service;
use util::state::AppState;

/// DELETE /api/topics/{topic_id}
///
/// Delete a topic nobody has selected. Owner or admin only.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": null,
///   "message": "Topic deleted successfully"
/// }
/// ```
///
/// - `403 Forbidden` - Not the owner
/// - `404 Not Found` - No topic with this id
/// - `409 Conflict` - Students still hold the topic
/// ```json
/// {
///   "success": false,
///   "data": { "code": "topic_in_use" },
///   "message": "Topic has selected students and cannot be deleted"
/// }
/// ```
pub async fn delete_topic(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(topic_id): Path<i64>,
) -> Response {
    match topic_service::delete(app_state.db(), &user.actor(), topic_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Topic deleted successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// DELETE /api/topics/{topic_id}/select
///
/// Release the caller's selection of this topic and free its seat.
///
/// ### Responses
/// - `200 OK` - Selection removed
/// - `404 Not Found` - The caller does not hold this topic
pub async fn deselect_topic(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(topic_id): Path<i64>,
) -> Response {
    match topic_service::deselect(app_state.db(), claims.sub, topic_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Topic selection removed")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
