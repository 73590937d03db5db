use crate::response::{ApiResponse, service_error_response};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::defense;
use util::state::AppState;

/// GET /api/defense
///
/// Every defense slot ordered by date, with committee and students.
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
///       "date": "2025-06-12",
///       "time_range": "09:00-11:00",
///       "location": "Room 301",
///       "group_name": "Group A",
///       "committee": [
///         { "member_id": 2, "name": "Dr. Chen", "role": "chair", "position": 0 }
///       ],
///       "students": [
///         { "student_id": 7, "username": "u20230001", "name": "Li Wei", "order_index": 0, "scheduled_time": "09:00" }
///       ]
///     }
///   ],
///   "message": "Defense slots retrieved successfully"
/// }
/// ```
pub async fn list_slots(State(app_state): State<AppState>) -> Response {
    match defense::list_slots(app_state.db()).await {
        Ok(slots) => (
            StatusCode::OK,
            Json(ApiResponse::success(slots, "Defense slots retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// GET /api/defense/{slot_id}
///
/// ### Responses
/// - `200 OK` - The slot
/// - `404 Not Found` - No slot with this id
pub async fn get_slot(State(app_state): State<AppState>, Path(slot_id): Path<i64>) -> Response {
    match defense::get_slot(app_state.db(), slot_id).await {
        Ok(slot) => (
            StatusCode::OK,
            Json(ApiResponse::success(slot, "Defense slot retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
