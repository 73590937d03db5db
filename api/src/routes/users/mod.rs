//! # Users Routes Module
//!
//! Routes for the `/api/users` endpoint group. The whole group is nested
//! behind `allow_admin`.
//!
//! ## Structure
//! - `get.rs` - GET handlers (list users, get user)
//! - `post.rs` - POST handlers (create user)

pub mod get;
pub mod post;

use axum::{Router, routing::get};
use get::{get_user, list_users};
use post::create_user;
use util::state::AppState;

/// Builds the `/users` route group, mapping HTTP methods to handlers.
///
/// - `GET /users` → `list_users`
/// - `POST /users` → `create_user`
/// - `GET /users/{user_id}` → `get_user`
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{user_id}", get(get_user))
}
