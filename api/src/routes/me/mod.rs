//! # Me Routes Module
//!
//! Caller-centric endpoints under `/api/me`. The whole group sits behind
//! `allow_authenticated`; individual routes narrow the role further.

pub mod get;

use crate::auth::guards::{allow_student_or_teacher, allow_teacher};
use axum::{Router, middleware::from_fn, routing::get};
use get::{get_dashboard, get_my_defense, get_my_students};
use util::state::AppState;

/// Builds the `/me` route group.
///
/// - `GET /me/dashboard` → `get_dashboard` (any role)
/// - `GET /me/students` → `get_my_students` (teacher)
/// - `GET /me/defense` → `get_my_defense` (student, teacher)
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route(
            "/students",
            get(get_my_students).route_layer(from_fn(allow_teacher)),
        )
        .route(
            "/defense",
            get(get_my_defense).route_layer(from_fn(allow_student_or_teacher)),
        )
}
