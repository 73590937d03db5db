//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by domain, each protected via the matching guard
//! from `auth::guards`.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Registration, login and current user
//! - `/topics` → Topic catalogue, authoring and selection
//! - `/proposal`, `/midterm`, `/thesis` → Document submissions and reviews
//! - `/progress` → Per-student stage progress
//! - `/me` → Role dashboards, supervised students, own defense schedule
//! - `/defense` → Defense scheduling (admin-only)
//! - `/process-stages` → Timeline of the thesis process
//! - `/statistics` → Portal-wide aggregates (admin-only)
//! - `/users` → User management (admin-only)

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::routes::{
    auth::auth_routes, defense::defense_routes, health::health_routes, me::me_routes,
    process_stages::process_stage_routes, progress::progress_routes,
    statistics::statistics_routes, submissions::submission_routes, topics::topic_routes,
    users::users_routes,
};
use axum::{Router, middleware::from_fn};
use db::models::submission::SubmissionKind;
use util::state::AppState;

pub mod auth;
pub mod defense;
pub mod health;
pub mod me;
pub mod process_stages;
pub mod progress;
pub mod statistics;
pub mod submissions;
pub mod topics;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// # Route Structure:
/// - `/health` → no authentication required.
/// - `/auth` → `register`/`login` are public, `me` guards itself.
/// - `/topics`, `/proposal`, `/midterm`, `/thesis`, `/progress`, `/process-stages`
///   → per-route guards inside each group.
/// - `/me` → any authenticated user; some routes narrow further.
/// - `/defense`, `/statistics`, `/users` → admins only.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/topics", topic_routes())
        .nest("/proposal", submission_routes(SubmissionKind::Proposal))
        .nest("/midterm", submission_routes(SubmissionKind::Midterm))
        .nest("/thesis", submission_routes(SubmissionKind::Thesis))
        .nest("/progress", progress_routes())
        .nest("/me", me_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/defense", defense_routes().route_layer(from_fn(allow_admin)))
        .nest("/process-stages", process_stage_routes())
        .nest(
            "/statistics",
            statistics_routes().route_layer(from_fn(allow_admin)),
        )
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .with_state(app_state)
}
