use super::post::{CommitteeMemberRequest, DefenseStudentRequest};
use crate::response::{ApiResponse, service_error_response};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::defense;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReplaceCommitteeRequest {
    pub committee: Vec<CommitteeMemberRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceStudentsRequest {
    pub students: Vec<DefenseStudentRequest>,
}

/// PUT /api/defense/{slot_id}/committee
///
/// Replace the slot's whole committee. An empty list clears it.
///
/// ### Request Body
/// ```json
/// {
///   "committee": [
///     { "member_id": 2, "role": "chair" },
///     { "member_id": 4, "role": "secretary" }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `200 OK` - The updated slot
/// - `400 Bad Request` - Duplicate, unknown or non-teacher members
/// - `404 Not Found` - No slot with this id
pub async fn replace_committee(
    State(app_state): State<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<ReplaceCommitteeRequest>,
) -> Response {
    let entries = req.committee.into_iter().map(Into::into).collect();

    match defense::replace_committee(app_state.db(), slot_id, entries).await {
        Ok(slot) => (
            StatusCode::OK,
            Json(ApiResponse::success(slot, "Defense committee updated successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// PUT /api/defense/{slot_id}/students
///
/// Replace the slot's student list; list order is the defense order.
///
/// ### Request Body
/// ```json
/// {
///   "students": [
///     { "student_id": 7, "scheduled_time": "09:00" },
///     { "student_id": 8, "scheduled_time": "09:40" }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `200 OK` - The updated slot
/// - `400 Bad Request` - Duplicate, unknown or non-student ids
/// - `404 Not Found` - No slot with this id
pub async fn replace_students(
    State(app_state): State<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<ReplaceStudentsRequest>,
) -> Response {
    let entries = req.students.into_iter().map(Into::into).collect();

    match defense::replace_students(app_state.db(), slot_id, entries).await {
        Ok(slot) => (
            StatusCode::OK,
            Json(ApiResponse::success(slot, "Defense students updated successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
