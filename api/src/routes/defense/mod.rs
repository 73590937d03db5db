//! # Defense Routes Module
//!
//! Defense scheduling under `/api/defense`. The group is nested behind
//! `allow_admin`; students and teachers read their own slots via `/me/defense`.
//!
//! ## Structure
//! - `get.rs` - slot listing and detail
//! - `post.rs` - slot creation
//! - `put.rs` - committee and student list replacement

pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{get, put},
};
use get::{get_slot, list_slots};
use post::create_slot;
use put::{replace_committee, replace_students};
use util::state::AppState;

/// Builds the `/defense` route group.
///
/// - `GET /defense` → `list_slots`
/// - `POST /defense` → `create_slot`
/// - `GET /defense/{slot_id}` → `get_slot`
/// - `PUT /defense/{slot_id}/committee` → `replace_committee`
/// - `PUT /defense/{slot_id}/students` → `replace_students`
pub fn defense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_slots).post(create_slot))
        .route("/{slot_id}", get(get_slot))
        .route("/{slot_id}/committee", put(replace_committee))
        .route("/{slot_id}/students", put(replace_students))
}
