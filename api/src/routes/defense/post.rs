use crate::response::{ApiResponse, service_error_response, validation_error_response};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use db::models::defense_committee_member::CommitteeRole;
use serde::Deserialize;
use services::defense::{self, CommitteeEntry, CreateSlot, StudentEntry};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Clone)]
pub struct CommitteeMemberRequest {
    pub member_id: i64,
    #[serde(default)]
    pub role: CommitteeRole,
}

impl From<CommitteeMemberRequest> for CommitteeEntry {
    fn from(r: CommitteeMemberRequest) -> Self {
        CommitteeEntry {
            member_id: r.member_id,
            role: r.role,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefenseStudentRequest {
    pub student_id: i64,
    pub scheduled_time: Option<String>,
}

impl From<DefenseStudentRequest> for StudentEntry {
    fn from(r: DefenseStudentRequest) -> Self {
        StudentEntry {
            student_id: r.student_id,
            scheduled_time: r.scheduled_time,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSlotRequest {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Time range is required"))]
    pub time_range: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub group_name: Option<String>,
    #[serde(default)]
    pub committee: Vec<CommitteeMemberRequest>,
    #[serde(default)]
    pub students: Vec<DefenseStudentRequest>,
}

/// POST /api/defense
///
/// Create a defense slot together with its committee and students. List order
/// becomes `position` / `order_index`.
///
/// ### Request Body
/// ```json
/// {
///   "date": "2025-06-12",
///   "time_range": "09:00-11:00",
///   "location": "Room 301",
///   "group_name": "Group A",
///   "committee": [
///     { "member_id": 2, "role": "chair" },
///     { "member_id": 3 }
///   ],
///   "students": [
///     { "student_id": 7, "scheduled_time": "09:00" }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `201 Created` - The slot with committee and students
/// - `400 Bad Request` - Blank fields, duplicate ids, unknown users or users of the wrong role
pub async fn create_slot(
    State(app_state): State<AppState>,
    Json(req): Json<CreateSlotRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    let params = CreateSlot {
        date: req.date,
        time_range: req.time_range,
        location: req.location,
        group_name: req.group_name,
        committee: req.committee.into_iter().map(Into::into).collect(),
        students: req.students.into_iter().map(Into::into).collect(),
    };

    match defense::create_slot(app_state.db(), params).await {
        Ok(slot) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(slot, "Defense slot created successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
