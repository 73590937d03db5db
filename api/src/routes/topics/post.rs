use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error_response, validation_error_response};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::topic::{Difficulty, TopicType};
use serde::Deserialize;
use services::topic::{self as topic_service, CreateTopic};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[serde(default)]
    pub topic_type: TopicType,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub description: Option<String>,
    pub requirements: Option<String>,
    #[validate(range(min = 1, message = "max_students must be at least 1"))]
    pub max_students: i32,
}

/// POST /api/topics
///
/// Publish a new topic owned by the caller.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Graph Neural Networks for Scheduling",
///   "topic_type": "algorithm_design",
///   "difficulty": "hard",
///   "description": "Explore GNN-based heuristics",
///   "requirements": "Python, PyTorch",
///   "max_students": 2
/// }
/// ```
/// `topic_type` defaults to `applied_research`, `difficulty` to `medium`.
///
/// ### Responses
/// - `201 Created` - The stored topic
/// - `400 Bad Request` - Blank title or `max_students < 1`
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `403 Forbidden` - Caller is a student
pub async fn create_topic(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTopicRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    let params = CreateTopic {
        title: req.title,
        topic_type: req.topic_type,
        difficulty: req.difficulty,
        description: req.description,
        requirements: req.requirements,
        max_students: req.max_students,
    };

    match topic_service::create(app_state.db(), &user.actor(), params).await {
        Ok(topic) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(topic, "Topic created successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// POST /api/topics/{topic_id}/select
///
/// Claim a seat on a topic. A student holds at most one topic at a time and a
/// topic never takes more than `max_students`; the capacity check and the
/// increment happen atomically.
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": { "id": 12, "student_id": 7, "topic_id": 3, "selected_at": "2025-03-01T09:00:00Z" },
///   "message": "Topic selected successfully"
/// }
/// ```
///
/// - `404 Not Found` - No topic with this id
/// - `409 Conflict` - Topic full or a topic is already selected
/// ```json
/// {
///   "success": false,
///   "data": { "code": "capacity_exceeded" },
///   "message": "Topic has no remaining capacity"
/// }
/// ```
pub async fn select_topic(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(topic_id): Path<i64>,
) -> Response {
    match topic_service::select(app_state.db(), claims.sub, topic_id).await {
        Ok(selection) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(selection, "Topic selected successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
