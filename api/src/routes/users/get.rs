use crate::response::{ApiResponse, service_error_response, validation_error_response};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::user::Role;
use serde::Deserialize;
use services::user::{self as user_service, UserFilter};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: Option<u64>,
    pub role: Option<Role>,
    pub query: Option<String>,
}

/// GET /api/users
///
/// Retrieve a paginated list of users with optional filtering. Requires admin
/// privileges.
///
/// ### Query Parameters
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `per_page` (optional): Items per page (default: 20, min: 1, max: 100)
/// - `role` (optional): `student`, `teacher` or `admin`
/// - `query` (optional): Partial match against username, name or email
///
/// ### Examples
/// ```http
/// GET /api/users?page=2&per_page=10
/// GET /api/users?role=teacher
/// GET /api/users?query=li
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "users": [
///       {
///         "id": 7,
///         "username": "u20230001",
///         "name": "Li Wei",
///         "email": "li.wei@example.com",
///         "role": "student",
///         "created_at": "2025-02-01T08:00:00Z",
///         "updated_at": "2025-02-01T08:00:00Z"
///       }
///     ],
///     "page": 1,
///     "per_page": 20,
///     "total": 47
///   },
///   "message": "Users retrieved successfully"
/// }
/// ```
///
/// - `400 Bad Request` - Invalid query parameters
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `403 Forbidden` - Authenticated but not admin user
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Response {
    if let Err(errors) = query.validate() {
        return validation_error_response(&errors).into_response();
    }

    let filter = UserFilter {
        role: query.role,
        query: query.query,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    };

    match user_service::list_users(app_state.db(), filter).await {
        Ok(page) => (
            StatusCode::OK,
            Json(ApiResponse::success(page, "Users retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

/// GET /api/users/{user_id}
///
/// ### Responses
/// - `200 OK` - The user
/// - `404 Not Found` - No user with this id
pub async fn get_user(State(app_state): State<AppState>, Path(user_id): Path<i64>) -> Response {
    match user_service::get_user(app_state.db(), user_id).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(user, "User retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
