use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error_response};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::topic::{Difficulty, TopicStatus, TopicType};
use serde::Deserialize;
use services::topic::{self as topic_service, TopicFilter};
use util::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct ListTopicsQuery {
    pub query: Option<String>,
    pub topic_type: Option<TopicType>,
    pub difficulty: Option<Difficulty>,
    pub status: Option<TopicStatus>,
}

impl From<ListTopicsQuery> for TopicFilter {
    fn from(q: ListTopicsQuery) -> Self {
        TopicFilter {
            query: q.query,
            topic_type: q.topic_type,
            difficulty: q.difficulty,
            status: q.status,
        }
    }
}

/// GET /api/topics
///
/// List every topic, newest first, with availability and the caller's own
/// selection flagged.
///
/// ### Query Parameters
/// - `query` (optional): Partial match on the title
/// - `topic_type` (optional): `applied_research`, `theoretical_research`, `system_design`, `algorithm_design`
/// - `difficulty` (optional): `easy`, `medium`, `hard`
/// - `status` (optional): `open` or `full`
///
/// ### Examples
/// ```http
/// GET /api/topics?status=open
/// GET /api/topics?topic_type=system_design&difficulty=hard
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 3,
///       "teacher_id": 2,
///       "title": "Graph Neural Networks for Scheduling",
///       "topic_type": "algorithm_design",
///       "difficulty": "hard",
///       "description": "...",
///       "requirements": null,
///       "max_students": 2,
///       "selected_count": 1,
///       "status": "open",
///       "is_selected": false,
///       "teacher_name": "Dr. Chen"
///     }
///   ],
///   "message": "Topics retrieved successfully"
/// }
/// ```
///
/// - `400 Bad Request` - Unknown filter value
/// - `401 Unauthorized` - Missing or invalid JWT
pub async fn list_topics(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListTopicsQuery>,
) -> Response {
    match topic_service::list(app_state.db(), &user.actor(), &query.into()).await {
        Ok(topics) => (
            StatusCode::OK,
            Json(ApiResponse::success(topics, "Topics retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// GET /api/topics/{topic_id}
///
/// Fetch one topic with the same fields as the listing.
///
/// ### Responses
/// - `200 OK` - Topic found
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `404 Not Found` - No topic with this id
pub async fn get_topic(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(topic_id): Path<i64>,
) -> Response {
    match topic_service::get(app_state.db(), &user.actor(), topic_id).await {
        Ok(topic) => (
            StatusCode::OK,
            Json(ApiResponse::success(topic, "Topic retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// GET /api/topics/my-topics
///
/// Topics published by the calling teacher, each with the students who
/// selected it.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 3,
///       "title": "Graph Neural Networks for Scheduling",
///       "selected_count": 1,
///       "status": "open",
///       "students": [
///         {
///           "id": 7,
///           "username": "u20230001",
///           "name": "Li Wei",
///           "email": "li.wei@example.com",
///           "selected_at": "2025-03-01T09:00:00Z"
///         }
///       ]
///     }
///   ],
///   "message": "Topics retrieved successfully"
/// }
/// ```
///
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `403 Forbidden` - Caller is a student
pub async fn list_my_topics(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    match topic_service::my_topics(app_state.db(), &user.actor()).await {
        Ok(topics) => (
            StatusCode::OK,
            Json(ApiResponse::success(topics, "Topics retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
