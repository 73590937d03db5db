use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error_response};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::{dashboard, defense, progress};
use util::state::AppState;

/// GET /api/me/dashboard
///
/// Landing data for the caller, shaped by role and tagged with `role`.
///
/// - student: own user, selected topic, progress, defense slots, process stages
/// - teacher: topic count, supervised students with progress, unreviewed submissions, defense slots
/// - admin: user counts by role, topic/selection/submission totals, unreviewed submissions, process stages
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "role": "teacher",
///     "user": { "id": 2, "username": "chen", "role": "teacher" },
///     "topic_count": 3,
///     "student_count": 2,
///     "pending_reviews": 1,
///     "students": [],
///     "defense": []
///   },
///   "message": "Dashboard retrieved successfully"
/// }
/// ```
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    match dashboard::dashboard(app_state.db(), &user.actor()).await {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Dashboard retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// GET /api/me/students
///
/// Students holding one of the caller's topics, with their topic and progress.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 7,
///       "username": "u20230001",
///       "name": "Li Wei",
///       "email": "li.wei@example.com",
///       "topic_id": 3,
///       "topic_title": "Graph Neural Networks for Scheduling",
///       "selected_at": "2025-03-01T09:00:00Z",
///       "progress": { "completed_stages": 2, "total_stages": 6, "completion_percent": 33 }
///     }
///   ],
///   "message": "Students retrieved successfully"
/// }
/// ```
pub async fn get_my_students(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    match progress::supervised_students(app_state.db(), &user.actor()).await {
        Ok(students) => (
            StatusCode::OK,
            Json(ApiResponse::success(students, "Students retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// GET /api/me/defense
///
/// Defense slots the caller takes part in, as a scheduled student or as a
/// committee member.
///
/// ### Responses
/// - `200 OK` - List of slots with committee and students
/// - `403 Forbidden` - Caller is an admin
pub async fn get_my_defense(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match defense::slots_for_user(app_state.db(), claims.sub, claims.role).await {
        Ok(slots) => (
            StatusCode::OK,
            Json(ApiResponse::success(slots, "Defense schedule retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
