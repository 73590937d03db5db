use crate::{Actor, ServiceError, ServiceResult, supervision};
use db::models::{
    review,
    submission::{self, Stage, SubmissionKind},
    user::{self, Role},
};
use db::progress::{SubmissionStatus, submission_status};
use db::stores::{NewSubmission, SubmissionStore};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use util::paths;

/// Raw multipart fields for an upload, before validation.
#[derive(Debug, Clone, Default)]
pub struct SubmissionUpload {
    pub title: Option<String>,
    pub stage: Option<String>,
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub submission: submission::Model,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: review::Model,
    pub reviewer_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    #[serde(flatten)]
    pub submission: submission::Model,
    pub status: SubmissionStatus,
    pub student_username: String,
    pub student_name: String,
    /// Newest first.
    pub reviews: Vec<ReviewView>,
}

fn resolve_stage(kind: SubmissionKind, raw: Option<&str>) -> ServiceResult<Stage> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    match (kind, raw) {
        (SubmissionKind::Proposal, None) => Ok(Stage::Proposal),
        (SubmissionKind::Midterm, None) => Ok(Stage::Midterm),
        (SubmissionKind::Thesis, None) => Err(ServiceError::validation(
            "Stage is required (first_review, second_review or final_submission)",
        )),
        (_, Some(value)) => {
            let stage = Stage::from_str(value)
                .map_err(|_| ServiceError::validation(format!("Unknown stage '{value}'")))?;
            if kind.accepts(stage) {
                Ok(stage)
            } else {
                Err(ServiceError::validation(format!(
                    "Stage '{stage}' cannot be submitted as a {kind}"
                )))
            }
        }
    }
}

/// Validates an upload, writes the file under the storage root and records
/// the submission. Resubmitting creates a new history entry.
pub async fn submit<S>(
    store: &S,
    student_id: i64,
    kind: SubmissionKind,
    upload: SubmissionUpload,
) -> ServiceResult<SubmissionRecord>
where
    S: SubmissionStore + ?Sized,
{
    let title = upload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServiceError::validation("Title is required"))?
        .to_string();

    let filename = match upload.filename.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() && !upload.bytes.is_empty() => name.to_string(),
        _ => return Err(ServiceError::validation("A non-empty file is required")),
    };

    let stage = resolve_stage(kind, upload.stage.as_deref())?;

    let file_reference = paths::store_submission_file(student_id, &filename, &upload.bytes)?;

    let submission = store
        .insert_submission(NewSubmission {
            student_id,
            title,
            stage,
            file_reference,
            original_filename: filename,
        })
        .await?;

    tracing::info!(
        submission_id = submission.id,
        student_id,
        stage = %submission.stage,
        "Submission recorded"
    );

    Ok(SubmissionRecord {
        submission,
        status: SubmissionStatus::PendingReview,
    })
}

async fn assemble(
    db: &DatabaseConnection,
    rows: Vec<(submission::Model, Option<user::Model>)>,
) -> ServiceResult<Vec<SubmissionView>> {
    let ids: Vec<i64> = rows.iter().map(|(s, _)| s.id).collect();
    let reviews = review::Model::find_for_submissions(db, &ids).await?;

    let reviewer_ids: Vec<i64> = reviews.iter().map(|r| r.reviewer_id).collect();
    let reviewer_names: HashMap<i64, String> = if reviewer_ids.is_empty() {
        HashMap::new()
    } else {
        user::Entity::find()
            .filter(user::Column::Id.is_in(reviewer_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|(submission, student)| {
            let status = submission_status(submission.id, &reviews);
            let own_reviews = reviews
                .iter()
                .filter(|r| r.submission_id == submission.id)
                .map(|r| ReviewView {
                    reviewer_name: reviewer_names.get(&r.reviewer_id).cloned().unwrap_or_default(),
                    review: r.clone(),
                })
                .collect();
            let (student_username, student_name) = student
                .map(|u| (u.username, u.name))
                .unwrap_or_default();
            SubmissionView {
                submission,
                status,
                student_username,
                student_name,
                reviews: own_reviews,
            }
        })
        .collect())
}

/// The caller's own submissions of one kind, newest first.
pub async fn list_mine(
    db: &DatabaseConnection,
    student_id: i64,
    kind: SubmissionKind,
) -> ServiceResult<Vec<SubmissionView>> {
    let rows = submission::Entity::find()
        .filter(submission::Column::StudentId.eq(student_id))
        .filter(submission::Column::Stage.is_in(kind.stages().iter().copied()))
        .order_by_desc(submission::Column::SubmittedAt)
        .order_by_desc(submission::Column::Id)
        .find_also_related(user::Entity)
        .all(db)
        .await?;
    assemble(db, rows).await
}

/// Every submission of one kind the caller may see. Teachers are limited to
/// the students they supervise. `query` matches the student's username or name.
pub async fn list_all(
    db: &DatabaseConnection,
    actor: &Actor,
    kind: SubmissionKind,
    query: Option<&str>,
) -> ServiceResult<Vec<SubmissionView>> {
    let mut select = submission::Entity::find()
        .filter(submission::Column::Stage.is_in(kind.stages().iter().copied()))
        .order_by_desc(submission::Column::SubmittedAt)
        .order_by_desc(submission::Column::Id)
        .find_also_related(user::Entity);

    match actor.role {
        Role::Admin => {}
        Role::Teacher => {
            let students = supervision::supervised_student_ids(db, actor.id).await?;
            if students.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(submission::Column::StudentId.is_in(students));
        }
        Role::Student => {
            return Err(ServiceError::unauthorized(
                "Students may only list their own submissions",
            ));
        }
    }

    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(user::Column::Username.contains(q))
                .add(user::Column::Name.contains(q)),
        );
    }

    let rows = select.all(db).await?;
    assemble(db, rows).await
}

/// Loads a submission of the given kind, or `NotFound` when it is missing or
/// belongs to another kind (a midterm is not reachable through `/proposal`).
pub async fn find_of_kind<S>(
    store: &S,
    kind: SubmissionKind,
    submission_id: i64,
) -> ServiceResult<submission::Model>
where
    S: SubmissionStore + ?Sized,
{
    store
        .find_submission(submission_id)
        .await?
        .filter(|s| kind.accepts(s.stage))
        .ok_or_else(|| ServiceError::not_found(format!("{kind} submission not found")))
}

pub async fn detail(
    db: &DatabaseConnection,
    actor: &Actor,
    kind: SubmissionKind,
    submission_id: i64,
) -> ServiceResult<SubmissionView> {
    let found = find_of_kind(db, kind, submission_id).await?;

    if !supervision::can_view_student(db, actor, found.student_id).await? {
        return Err(ServiceError::unauthorized(
            "You may not view this submission",
        ));
    }

    let student = user::Model::get_by_id(db, found.student_id).await?;
    let mut views = assemble(db, vec![(found, student)]).await?;
    views
        .pop()
        .ok_or_else(|| ServiceError::not_found("Submission not found"))
}
