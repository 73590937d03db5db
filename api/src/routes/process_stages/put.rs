use crate::response::{ApiResponse, service_error_response, validation_error_response};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use db::models::process_stage::ProcessStatus;
use serde::Deserialize;
use services::process_stage::{self, UpdateProcessStage};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, Default)]
pub struct UpdateProcessStageRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ProcessStatus>,
}

/// PUT /api/process-stages/{stage_id}
///
/// Partially update a stage; typically used to move `status` along.
///
/// ### Request Body
/// ```json
/// { "status": "in_progress" }
/// ```
///
/// ### Responses
/// - `200 OK` - The updated stage
/// - `400 Bad Request` - Blank name or dates out of order
/// - `404 Not Found` - No stage with this id
pub async fn update_process_stage(
    State(app_state): State<AppState>,
    Path(stage_id): Path<i64>,
    Json(req): Json<UpdateProcessStageRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    let params = UpdateProcessStage {
        name: req.name,
        start_date: req.start_date,
        end_date: req.end_date,
        status: req.status,
    };

    match process_stage::update(app_state.db(), stage_id, params).await {
        Ok(stage) => (
            StatusCode::OK,
            Json(ApiResponse::success(stage, "Process stage updated successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
