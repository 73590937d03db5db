//! # Topics Routes Module
//!
//! Routes for the `/api/topics` endpoint group.
//!
//! ## Structure
//! - `get.rs` - catalogue listing, single topic, a teacher's own topics
//! - `post.rs` - topic creation and student selection
//! - `put.rs` - topic updates
//! - `delete.rs` - topic deletion and student deselection
//!
//! ## Middleware
//! Every route requires authentication. Authoring routes pass `allow_teacher`
//! (teachers and admins; ownership is checked per topic), selection routes
//! pass `allow_student`.

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_authenticated, allow_student, allow_teacher};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use delete::{delete_topic, deselect_topic};
use get::{get_topic, list_my_topics, list_topics};
use post::{create_topic, select_topic};
use put::update_topic;
use util::state::AppState;

/// Builds the `/topics` route group, mapping HTTP methods to handlers.
///
/// - `GET /topics` → `list_topics` (authenticated)
/// - `POST /topics` → `create_topic` (teacher, admin)
/// - `GET /topics/my-topics` → `list_my_topics` (teacher)
/// - `GET /topics/{topic_id}` → `get_topic` (authenticated)
/// - `PUT /topics/{topic_id}` → `update_topic` (owner or admin)
/// - `DELETE /topics/{topic_id}` → `delete_topic` (owner or admin)
/// - `POST /topics/{topic_id}/select` → `select_topic` (student)
/// - `DELETE /topics/{topic_id}/select` → `deselect_topic` (student)
pub fn topic_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_topics)
                .route_layer(from_fn(allow_authenticated))
                .merge(post(create_topic).route_layer(from_fn(allow_teacher))),
        )
        .route(
            "/my-topics",
            get(list_my_topics).route_layer(from_fn(allow_teacher)),
        )
        .route(
            "/{topic_id}",
            get(get_topic)
                .route_layer(from_fn(allow_authenticated))
                .merge(
                    put(update_topic)
                        .delete(delete_topic)
                        .route_layer(from_fn(allow_teacher)),
                ),
        )
        .route(
            "/{topic_id}/select",
            post(select_topic)
                .delete(deselect_topic)
                .route_layer(from_fn(allow_student)),
        )
}
