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
use services::topic::{self as topic_service, UpdateTopic};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, Default)]
pub struct UpdateTopicRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub topic_type: Option<TopicType>,
    pub difficulty: Option<Difficulty>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    #[validate(range(min = 1, message = "max_students must be at least 1"))]
    pub max_students: Option<i32>,
}

/// PUT /api/topics/{topic_id}
///
/// Partially update a topic. Only the owning teacher or an admin may edit it.
/// `max_students` cannot drop below the number of students already holding it.
///
/// ### Request Body
/// Any subset of the creation fields:
/// ```json
/// {
///   "title": "GNNs for Exam Scheduling",
///   "max_students": 3
/// }
/// ```
///
/// ### Responses
/// - `200 OK` - The updated topic
/// - `400 Bad Request` - Invalid field, or capacity below current selections
/// - `403 Forbidden` - Not the owner
/// - `404 Not Found` - No topic with this id
pub async fn update_topic(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(topic_id): Path<i64>,
    Json(req): Json<UpdateTopicRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    let params = UpdateTopic {
        title: req.title,
        topic_type: req.topic_type,
        difficulty: req.difficulty,
        description: req.description,
        requirements: req.requirements,
        max_students: req.max_students,
    };

    match topic_service::update(app_state.db(), &user.actor(), topic_id, params).await {
        Ok(topic) => (
            StatusCode::OK,
            Json(ApiResponse::success(topic, "Topic updated successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
