use crate::response::{ApiResponse, service_error_response};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use services::statistics;
use util::state::AppState;

/// Builds the `/statistics` route group. Nested behind `allow_admin`.
pub fn statistics_routes() -> Router<AppState> {
    Router::new().route("/", get(get_statistics))
}

/// GET /api/statistics
///
/// Portal-wide aggregates. Stage figures come from the same progress
/// derivation students see; scores are the latest review of each reviewed stage.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "users": { "students": 40, "teachers": 6, "admins": 1 },
///     "total_topics": 18,
///     "topics_by_type": [ { "topic_type": "applied_research", "count": 7 } ],
///     "total_selections": 35,
///     "stages": [ { "stage": "proposal", "submitted": 30, "reviewed": 28, "passed": 25, "failed": 1 } ],
///     "average_completion": 41.5,
///     "average_passing_score": 82.3,
///     "score_distribution": [ { "range": "90-100", "count": 6 } ]
///   },
///   "message": "Statistics retrieved successfully"
/// }
/// ```
pub async fn get_statistics(State(app_state): State<AppState>) -> Response {
    match statistics::statistics(app_state.db()).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Statistics retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
