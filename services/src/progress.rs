use crate::{Actor, ServiceError, ServiceResult, supervision};
use chrono::{DateTime, Utc};
use db::models::{
    topic, topic_selection,
    user::{self, Role},
};
use db::progress::{Progress, compute_progress};
use db::stores::{ReviewStore, SubmissionStore, TopicStore};
use sea_orm::{DatabaseConnection, EntityTrait};
use serde::Serialize;

/// Fetches a student's records through the stores and derives their progress.
pub async fn student_progress<S>(store: &S, student_id: i64) -> ServiceResult<Progress>
where
    S: SubmissionStore + ReviewStore + TopicStore + ?Sized,
{
    let has_selection = store.selection_for_student(student_id).await?.is_some();
    let submissions = store.submissions_for_student(student_id).await?;
    let reviews = store.reviews_for_student(student_id).await?;
    Ok(compute_progress(has_selection, &submissions, &reviews))
}

/// Progress of `student_id` as seen by `actor`.
pub async fn progress_for(
    db: &DatabaseConnection,
    actor: &Actor,
    student_id: i64,
) -> ServiceResult<Progress> {
    let student = user::Model::get_by_id(db, student_id)
        .await?
        .filter(|u| u.role == Role::Student)
        .ok_or_else(|| ServiceError::not_found("Student not found"))?;

    if !supervision::can_view_student(db, actor, student.id).await? {
        return Err(ServiceError::unauthorized(
            "You may only view progress of students you supervise",
        ));
    }

    student_progress(db, student.id).await
}

#[derive(Debug, Clone, Serialize)]
pub struct SupervisedStudent {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub topic_id: i64,
    pub topic_title: String,
    pub selected_at: DateTime<Utc>,
    pub progress: Progress,
}

/// Students holding one of the teacher's topics, with their progress.
pub async fn supervised_students(
    db: &DatabaseConnection,
    teacher: &Actor,
) -> ServiceResult<Vec<SupervisedStudent>> {
    let topics = topic::Model::find_by_teacher(db, teacher.id).await?;
    let mut out = Vec::new();

    for t in topics {
        let selections = topic_selection::Model::find_for_topic(db, t.id).await?;
        for selection in selections {
            let Some(student) = user::Entity::find_by_id(selection.student_id).one(db).await? else {
                continue;
            };
            let progress = student_progress(db, student.id).await?;
            out.push(SupervisedStudent {
                id: student.id,
                username: student.username,
                name: student.name,
                email: student.email,
                topic_id: t.id,
                topic_title: t.title.clone(),
                selected_at: selection.selected_at,
                progress,
            });
        }
    }

    out.sort_by(|a, b| a.username.cmp(&b.username));
    Ok(out)
}
