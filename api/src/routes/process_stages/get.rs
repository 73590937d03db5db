use crate::response::{ApiResponse, service_error_response};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::process_stage;
use util::state::AppState;

/// GET /api/process-stages
///
/// All process stages ordered by start date.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "name": "Topic selection",
///       "start_date": "2025-02-20",
///       "end_date": "2025-03-10",
///       "status": "completed",
///       "created_at": "2025-02-01T08:00:00Z",
///       "updated_at": "2025-03-11T08:00:00Z"
///     }
///   ],
///   "message": "Process stages retrieved successfully"
/// }
/// ```
pub async fn list_process_stages(State(app_state): State<AppState>) -> Response {
    match process_stage::list(app_state.db()).await {
        Ok(stages) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                stages,
                "Process stages retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
