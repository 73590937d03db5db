use crate::response::{ApiResponse, service_error_response, validation_error_response};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::user::Role;
use serde::Deserialize;
use services::user::{self as user_service, CreateUser};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: Role,
}

/// POST /api/users
///
/// Create an account of any role, admins included.
///
/// ### Request Body
/// ```json
/// {
///   "username": "chen",
///   "name": "Dr. Chen",
///   "email": "chen@example.com",
///   "password": "secret1",
///   "role": "teacher"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` - The new user
/// - `400 Bad Request` - Validation failure
/// - `409 Conflict` - Username or email taken
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    let params = CreateUser {
        username: req.username,
        name: req.name,
        email: req.email,
        password: req.password,
        role: req.role,
    };

    match user_service::create_user(app_state.db(), params).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(user, "User created successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
