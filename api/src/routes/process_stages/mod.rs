//! # Process Stage Routes Module
//!
//! The admin-maintained timeline of the thesis process. Everyone signed in can
//! read it; only admins change it.

pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_admin, allow_authenticated};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use get::list_process_stages;
use post::create_process_stage;
use put::update_process_stage;
use util::state::AppState;

/// Builds the `/process-stages` route group.
///
/// - `GET /process-stages` → `list_process_stages` (authenticated)
/// - `POST /process-stages` → `create_process_stage` (admin)
/// - `PUT /process-stages/{stage_id}` → `update_process_stage` (admin)
pub fn process_stage_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_process_stages)
                .route_layer(from_fn(allow_authenticated))
                .merge(post(create_process_stage).route_layer(from_fn(allow_admin))),
        )
        .route(
            "/{stage_id}",
            put(update_process_stage).route_layer(from_fn(allow_admin)),
        )
}
