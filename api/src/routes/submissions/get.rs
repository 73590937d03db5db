use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error_response};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::submission::SubmissionKind;
use serde::Deserialize;
use services::submission as submission_service;
use util::state::AppState;

/// GET /api/proposal/my-proposals (also `/midterm/my-midterms`, `/thesis/my-thesis`)
///
/// The caller's own submissions of this kind, newest first, each with its
/// derived status and embedded reviews.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 5,
///       "title": "Adaptive Caching",
///       "stage": "proposal",
///       "status": "passed",
///       "student_username": "u20230001",
///       "student_name": "Li Wei",
///       "reviews": [
///         { "id": 2, "score": 85, "result": "pass", "feedback": "Good", "reviewer_name": "Dr. Chen" }
///       ]
///     }
///   ],
///   "message": "Submissions retrieved successfully"
/// }
/// ```
pub async fn list_my_submissions(
    State(app_state): State<AppState>,
    Extension(kind): Extension<SubmissionKind>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match submission_service::list_mine(app_state.db(), claims.sub, kind).await {
        Ok(items) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                items,
                "Submissions retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListSubmissionsQuery {
    /// Partial match on the student's username or name.
    pub query: Option<String>,
}

/// GET /api/proposal/all-proposals (also `/midterm/all-midterms`, `/thesis/all-theses`)
///
/// Every submission of this kind the caller may see. Teachers only see the
/// students they supervise; admins see everything.
///
/// ### Query Parameters
/// - `query` (optional): Partial match on the student's username or name
///
/// ### Responses
/// - `200 OK` - Same item shape as the own-history listing
/// - `403 Forbidden` - Caller is a student
pub async fn list_all_submissions(
    State(app_state): State<AppState>,
    Extension(kind): Extension<SubmissionKind>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListSubmissionsQuery>,
) -> Response {
    match submission_service::list_all(app_state.db(), &user.actor(), kind, query.query.as_deref())
        .await
    {
        Ok(items) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                items,
                "Submissions retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// GET /api/{proposal|midterm|thesis}/{submission_id}
///
/// One submission with its reviews. Visible to its author, the supervising
/// teacher and admins.
///
/// ### Responses
/// - `200 OK` - The submission
/// - `403 Forbidden` - Caller may not view it
/// - `404 Not Found` - No submission of this kind with this id
pub async fn get_submission(
    State(app_state): State<AppState>,
    Extension(kind): Extension<SubmissionKind>,
    Extension(user): Extension<AuthUser>,
    Path(submission_id): Path<i64>,
) -> Response {
    match submission_service::detail(app_state.db(), &user.actor(), kind, submission_id).await {
        Ok(view) => (
            StatusCode::OK,
            Json(ApiResponse::success(view, "Submission retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
