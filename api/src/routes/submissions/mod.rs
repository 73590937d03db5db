//! # Submission Routes Module
//!
//! One router shape serves the three document kinds. It is nested under
//! `/proposal`, `/midterm` and `/thesis`, and the kind reaches the handlers as
//! an `Extension<SubmissionKind>`.
//!
//! ## Structure
//! - `post.rs` - multipart upload and reviews
//! - `get.rs` - history listings and single submission detail
//!
//! ## Middleware
//! - upload and own history → `allow_student`
//! - full listing and review → `allow_teacher` (teachers and admins)
//! - detail → `allow_authenticated`, then owner / supervisor / admin in the service

pub mod get;
pub mod post;

use crate::auth::guards::{allow_authenticated, allow_student, allow_teacher};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
};
use db::models::submission::SubmissionKind;
use get::{get_submission, list_all_submissions, list_my_submissions};
use post::{review_submission, submit};
use util::{config, state::AppState};

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Collection paths for each kind: (own history, full listing).
fn listing_paths(kind: SubmissionKind) -> (&'static str, &'static str) {
    match kind {
        SubmissionKind::Proposal => ("/my-proposals", "/all-proposals"),
        SubmissionKind::Midterm => ("/my-midterms", "/all-midterms"),
        SubmissionKind::Thesis => ("/my-thesis", "/all-theses"),
    }
}

/// Builds the route group for one submission kind.
///
/// For `/proposal` (the others differ only in the listing paths):
/// - `POST /proposal/submit` → `submit` (student, multipart)
/// - `GET /proposal/my-proposals` → `list_my_submissions` (student)
/// - `GET /proposal/all-proposals` → `list_all_submissions` (teacher, admin)
/// - `GET /proposal/{submission_id}` → `get_submission` (owner, supervisor, admin)
/// - `POST /proposal/{submission_id}/review` → `review_submission` (teacher, admin)
pub fn submission_routes(kind: SubmissionKind) -> Router<AppState> {
    let (mine, all) = listing_paths(kind);

    let student = Router::new()
        .route(
            "/submit",
            post(submit).layer(DefaultBodyLimit::max(
                config::max_upload_bytes() + MULTIPART_OVERHEAD,
            )),
        )
        .route(mine, get(list_my_submissions))
        .route_layer(from_fn(allow_student));

    let reviewer = Router::new()
        .route(all, get(list_all_submissions))
        .route("/{submission_id}/review", post(review_submission))
        .route_layer(from_fn(allow_teacher));

    let shared = Router::new()
        .route("/{submission_id}", get(get_submission))
        .route_layer(from_fn(allow_authenticated));

    student
        .merge(reviewer)
        .merge(shared)
        .layer(Extension(kind))
}
