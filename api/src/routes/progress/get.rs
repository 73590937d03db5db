use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error_response};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::progress as progress_service;
use util::state::AppState;

/// GET /api/progress
///
/// The caller's own progress across the six stages.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "stages": {
///       "topic_selection": { "status": "completed" },
///       "proposal": {
///         "status": "completed",
///         "submission_id": 5,
///         "submission_title": "Adaptive Caching",
///         "result": "pass",
///         "score": 85,
///         "feedback": "Good",
///         "completed_at": "2025-03-12T10:00:00Z"
///       },
///       "midterm": { "status": "in-progress", "note": "under review", "submission_id": 6 },
///       "first_review": { "status": "pending" },
///       "second_review": { "status": "pending" },
///       "final_submission": { "status": "pending" }
///     },
///     "completed_stages": 2,
///     "total_stages": 6,
///     "completion_percent": 33
///   },
///   "message": "Progress retrieved successfully"
/// }
/// ```
pub async fn get_my_progress(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match progress_service::student_progress(app_state.db(), claims.sub).await {
        Ok(progress) => (
            StatusCode::OK,
            Json(ApiResponse::success(progress, "Progress retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// GET /api/progress/{student_id}
///
/// Progress of one student. Teachers may only look at students who selected
/// one of their topics.
///
/// ### Responses
/// - `200 OK` - Same shape as `GET /api/progress`
/// - `403 Forbidden` - Teacher does not supervise this student
/// - `404 Not Found` - No student with this id
pub async fn get_student_progress(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(student_id): Path<i64>,
) -> Response {
    match progress_service::progress_for(app_state.db(), &user.actor(), student_id).await {
        Ok(progress) => (
            StatusCode::OK,
            Json(ApiResponse::success(progress, "Progress retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
