//! # Progress Routes Module
//!
//! Stage-by-stage progress derived from a student's selection, submissions
//! and reviews. Nothing here writes.

pub mod get;

use crate::auth::guards::{allow_student, allow_teacher};
use axum::{Router, middleware::from_fn, routing::get};
use get::{get_my_progress, get_student_progress};
use util::state::AppState;

/// Builds the `/progress` route group.
///
/// - `GET /progress` → `get_my_progress` (student)
/// - `GET /progress/{student_id}` → `get_student_progress` (supervising teacher, admin)
pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_my_progress).route_layer(from_fn(allow_student)),
        )
        .route(
            "/{student_id}",
            get(get_student_progress).route_layer(from_fn(allow_teacher)),
        )
}
