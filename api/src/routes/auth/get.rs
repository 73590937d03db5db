use crate::auth::AuthUser;
use crate::response::{ApiResponse, service_error_response};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::user as user_service;
use util::state::AppState;

/// GET /auth/me
///
/// Returns the authenticated user's account.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "u20230001",
///     "name": "Li Wei",
///     "email": "li.wei@example.com",
///     "role": "student",
///     "created_at": "2025-05-23T18:00:00Z",
///     "updated_at": "2025-05-23T18:00:00Z"
///   },
///   "message": "User data retrieved successfully"
/// }
/// ```
///
/// - `401 Unauthorized` (missing or invalid token)
/// - `404 Not Found` (account deleted since the token was issued)
pub async fn get_me(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match user_service::get_user(app_state.db(), claims.sub).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(user, "User data retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
