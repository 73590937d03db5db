use crate::auth::generate_jwt;
use crate::response::{
    ApiResponse, ErrorData, service_error_response, validation_error_response,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::user::{self, Role};
use serde::{Deserialize, Serialize};
use services::user::{self as user_service, CreateUser};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "Username is required"))]
    pub username: String,

    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Student
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: user::Model,
    pub token: String,
    pub expires_at: String,
}

impl AuthResponse {
    fn issue(user: user::Model) -> Self {
        let (token, expires_at) = generate_jwt(user.id, user.role);
        Self {
            user,
            token,
            expires_at,
        }
    }
}

/// POST /auth/register
///
/// Register a new student or teacher account and log it in.
///
/// ### Request Body
/// ```json
/// {
///   "username": "u20230001",
///   "name": "Li Wei",
///   "email": "li.wei@example.com",
///   "password": "secret1",
///   "role": "student"
/// }
/// ```
/// `name` defaults to the username, `role` to `student`. `admin` is refused.
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "user": { "id": 1, "username": "u20230001", "role": "student", "...": "..." },
///     "token": "jwt_token_here",
///     "expires_at": "2025-05-23T11:00:00Z"
///   },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure or admin role)
/// - `409 Conflict` (username or email taken)
/// ```json
/// {
///   "success": false,
///   "data": { "code": "conflict" },
///   "message": "A user with this username or email already exists"
/// }
/// ```
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| req.username.clone());

    let params = CreateUser {
        username: req.username,
        name,
        email: req.email,
        password: req.password,
        role: req.role,
    };

    match user_service::register(app_state.db(), params).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                AuthResponse::issue(user),
                "User registered successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /auth/login
///
/// Authenticate with a username or email and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "identifier": "u20230001",
///   "password": "secret1"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK` with the same payload as `register`.
/// - `400 Bad Request` (missing fields)
/// - `401 Unauthorized` (unknown user or wrong password)
/// ```json
/// {
///   "success": false,
///   "data": { "code": "invalid_credentials" },
///   "message": "Invalid username/email or password"
/// }
/// ```
pub async fn login(State(app_state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    match user_service::authenticate(app_state.db(), &req.identifier, &req.password).await {
        Ok(Some(user)) => {
            tracing::info!(user_id = user.id, role = %user.role, "User logged in");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    AuthResponse::issue(user),
                    "Login successful",
                )),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse {
                success: false,
                data: ErrorData::new("invalid_credentials"),
                message: "Invalid username/email or password".to_string(),
            }),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
