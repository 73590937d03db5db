use crate::auth::AuthUser;
use crate::response::{
    ApiResponse, ErrorData, service_error_response, validation_error_response,
};
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::submission::SubmissionKind;
use serde::Deserialize;
use services::review::{self as review_service, ReviewInput};
use services::submission::{self as submission_service, SubmissionUpload};
use util::{config, state::AppState};
use validator::Validate;

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            success: false,
            data: ErrorData::new("validation_error"),
            message: message.into(),
        }),
    )
        .into_response()
}

/// Collects the `title`, `stage` and `file` parts. Unknown parts are ignored.
async fn read_upload(multipart: &mut Multipart) -> Result<SubmissionUpload, Response> {
    let mut upload = SubmissionUpload::default();
    let limit = config::max_upload_bytes();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("title") => {
                upload.title = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| bad_request("Invalid title field"))?,
                );
            }
            Some("stage") => {
                upload.stage = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| bad_request("Invalid stage field"))?,
                );
            }
            Some("file") => {
                upload.filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read file: {e}")))?;
                if bytes.len() > limit {
                    return Err(bad_request(format!(
                        "File exceeds the {limit} byte upload limit"
                    )));
                }
                upload.bytes = bytes.to_vec();
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// POST /api/{proposal|midterm|thesis}/submit
///
/// Upload a document. Every upload is a new history entry; earlier versions
/// are kept.
///
/// ### Multipart Body (form-data)
/// - `title` (required): Document title
/// - `file` (required): The document; must not be empty
/// - `stage` (thesis only, required there): `first_review`, `second_review` or
///   `final_submission`
///
/// ### Example
/// ```bash
/// curl -X POST http://localhost:3000/api/proposal/submit \
///   -H "Authorization: Bearer <token>" \
///   -F "title=Adaptive Caching" \
///   -F "file=@proposal.pdf"
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 5,
///     "student_id": 7,
///     "title": "Adaptive Caching",
///     "stage": "proposal",
///     "file_reference": "submissions/student_7/3f2a..._proposal.pdf",
///     "original_filename": "proposal.pdf",
///     "submitted_at": "2025-03-10T08:00:00Z",
///     "status": "pending_review"
///   },
///   "message": "Submission uploaded successfully"
/// }
/// ```
///
/// - `400 Bad Request` - Missing title, missing or empty file, unknown stage, oversized file
/// - `403 Forbidden` - Caller is not a student
pub async fn submit(
    State(app_state): State<AppState>,
    Extension(kind): Extension<SubmissionKind>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Response {
    let upload = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    match submission_service::submit(app_state.db(), claims.sub, kind, upload).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                record,
                "Submission uploaded successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(range(min = 0, max = 100, message = "Score must be between 0 and 100"))]
    pub score: i64,
    #[validate(length(min = 1, message = "Feedback is required"))]
    pub feedback: String,
    /// `pass`, `revise` or `fail`
    pub result: String,
}

/// POST /api/{proposal|midterm|thesis}/{submission_id}/review
///
/// Record a verdict on a submission. Teachers may only review students who
/// selected one of their topics; admins may review anything. The review's
/// stage is the submission's stage.
///
/// ### Request Body
/// ```json
/// {
///   "score": 85,
///   "feedback": "Solid methodology, tighten the related work.",
///   "result": "pass"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` - The stored review
/// - `400 Bad Request` - Score outside 0..=100, blank feedback, unknown result
/// - `403 Forbidden` - Teacher does not supervise this student
/// - `404 Not Found` - No submission of this kind with this id
pub async fn review_submission(
    State(app_state): State<AppState>,
    Extension(kind): Extension<SubmissionKind>,
    Extension(user): Extension<AuthUser>,
    Path(submission_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return validation_error_response(&errors).into_response();
    }

    let input = ReviewInput {
        score: req.score,
        feedback: req.feedback,
        result: req.result,
    };

    match review_service::review(app_state.db(), &user.actor(), kind, submission_id, input).await
    {
        Ok(review) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(review, "Review recorded successfully")),
        )
            .into_response(),
        Err(e) => service_error_response(e).into_response(),
    }
}
