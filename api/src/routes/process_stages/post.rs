use crate::response::{ApiResponse, service_error_response, validation_error_response};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use db::models::process_stage::ProcessStatus;
use serde::Deserialize;
use services::process_stage::{self, CreateProcessStage};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProcessStageRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<ProcessStatus>,
}

/// POST /api/process-stages
///
/// ### Request Body
/// ```json
/// {
///   "name": "Midterm check",
///   "start_date": "2025-04-01",
///   "end_date": "2025-04-20",
///   "status": "pending"
/// }
/// ```
/// `status` defaults to `pending`.
///
/// ### Responses
/// - `201 Created` - The stored stage
/// - `400 Bad Request` - Blank name or `end_date` before `start_date`
pub async fn create_process_stage(
    State(app_state): State<AppState>,
    Json(req): Json<CreateProcessStageRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    let params = CreateProcessStage {
        name: req.name,
        start_date: req.start_date,
        end_date: req.end_date,
        status: req.status,
    };

    match process_stage::create(app_state.db(), params).await {
        Ok(stage) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(stage, "Process stage created successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
