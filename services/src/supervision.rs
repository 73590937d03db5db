//! Who may see or act on a student's work.
//!
//! A teacher supervises a student when the student's active topic selection
//! points at a topic the teacher owns.

use crate::Actor;
use db::models::{topic, topic_selection, user::Role};
use db::stores::TopicStore;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect};

pub async fn supervises<S>(store: &S, teacher_id: i64, student_id: i64) -> Result<bool, DbErr>
where
    S: TopicStore + ?Sized,
{
    let Some(selection) = store.selection_for_student(student_id).await? else {
        return Ok(false);
    };
    Ok(store
        .find_topic(selection.topic_id)
        .await?
        .is_some_and(|t| t.teacher_id == teacher_id))
}

/// Admins see everyone, students see themselves, teachers see the students
/// they supervise.
pub async fn can_view_student<S>(store: &S, actor: &Actor, student_id: i64) -> Result<bool, DbErr>
where
    S: TopicStore + ?Sized,
{
    match actor.role {
        Role::Admin => Ok(true),
        Role::Student => Ok(actor.id == student_id),
        Role::Teacher => supervises(store, actor.id, student_id).await,
    }
}

pub async fn supervised_student_ids(
    db: &DatabaseConnection,
    teacher_id: i64,
) -> Result<Vec<i64>, DbErr> {
    topic_selection::Entity::find()
        .select_only()
        .column(topic_selection::Column::StudentId)
        .inner_join(topic::Entity)
        .filter(topic::Column::TeacherId.eq(teacher_id))
        .into_tuple::<i64>()
        .all(db)
        .await
}
