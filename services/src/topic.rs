use crate::{Actor, ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use db::models::{
    topic::{self, Difficulty, TopicStatus, TopicType},
    topic_selection, user,
};
use db::stores::{SelectOutcome, TopicStore};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use std::collections::HashMap;

/// A topic as shown to a particular viewer.
#[derive(Debug, Clone, Serialize)]
pub struct TopicView {
    #[serde(flatten)]
    pub topic: topic::Model,
    pub status: TopicStatus,
    pub is_selected: bool,
    pub teacher_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectingStudent {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub selected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnedTopic {
    #[serde(flatten)]
    pub topic: TopicView,
    pub students: Vec<SelectingStudent>,
}

#[derive(Debug, Clone, Default)]
pub struct TopicFilter {
    pub query: Option<String>,
    pub topic_type: Option<TopicType>,
    pub difficulty: Option<Difficulty>,
    pub status: Option<TopicStatus>,
}

#[derive(Debug, Clone)]
pub struct CreateTopic {
    pub title: String,
    pub topic_type: TopicType,
    pub difficulty: Difficulty,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub max_students: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTopic {
    pub title: Option<String>,
    pub topic_type: Option<TopicType>,
    pub difficulty: Option<Difficulty>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub max_students: Option<i32>,
}

fn view(topic: topic::Model, teacher_name: String, selected_topic: Option<i64>) -> TopicView {
    TopicView {
        status: topic.status(),
        is_selected: selected_topic == Some(topic.id),
        teacher_name,
        topic,
    }
}

async fn teacher_names(
    db: &DatabaseConnection,
    topics: &[topic::Model],
) -> ServiceResult<HashMap<i64, String>> {
    let ids: Vec<i64> = topics.iter().map(|t| t.teacher_id).collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let teachers = user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(teachers.into_iter().map(|u| (u.id, u.name)).collect())
}

async fn viewer_selection(db: &DatabaseConnection, viewer: &Actor) -> ServiceResult<Option<i64>> {
    if !viewer.is_student() {
        return Ok(None);
    }
    Ok(topic_selection::Model::find_for_student(db, viewer.id)
        .await?
        .map(|s| s.topic_id))
}

async fn find_topic_or_404(db: &DatabaseConnection, topic_id: i64) -> ServiceResult<topic::Model> {
    topic::Entity::find_by_id(topic_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Topic not found"))
}

fn ensure_can_manage(actor: &Actor, topic: &topic::Model) -> ServiceResult<()> {
    if actor.is_admin() || topic.is_owned_by(actor.id) {
        Ok(())
    } else {
        Err(ServiceError::unauthorized(
            "Only the topic owner or an admin may modify this topic",
        ))
    }
}

fn validate_title(title: &str) -> ServiceResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ServiceError::validation("Title is required"));
    }
    Ok(title.to_string())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// All topics with availability and the viewer's own selection flagged.
pub async fn list(
    db: &DatabaseConnection,
    viewer: &Actor,
    filter: &TopicFilter,
) -> ServiceResult<Vec<TopicView>> {
    let mut query = topic::Entity::find().order_by_desc(topic::Column::CreatedAt);

    if let Some(q) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        query = query.filter(topic::Column::Title.contains(q));
    }
    if let Some(t) = filter.topic_type {
        query = query.filter(topic::Column::TopicType.eq(t));
    }
    if let Some(d) = filter.difficulty {
        query = query.filter(topic::Column::Difficulty.eq(d));
    }
    match filter.status {
        Some(TopicStatus::Open) => {
            query = query.filter(
                Expr::col(topic::Column::SelectedCount).lt(Expr::col(topic::Column::MaxStudents)),
            );
        }
        Some(TopicStatus::Full) => {
            query = query.filter(
                Expr::col(topic::Column::SelectedCount).gte(Expr::col(topic::Column::MaxStudents)),
            );
        }
        None => {}
    }

    let topics = query.all(db).await?;
    let names = teacher_names(db, &topics).await?;
    let selected = viewer_selection(db, viewer).await?;

    Ok(topics
        .into_iter()
        .map(|t| {
            let name = names.get(&t.teacher_id).cloned().unwrap_or_default();
            view(t, name, selected)
        })
        .collect())
}

pub async fn get(db: &DatabaseConnection, viewer: &Actor, topic_id: i64) -> ServiceResult<TopicView> {
    let topic = find_topic_or_404(db, topic_id).await?;
    let name = teacher_names(db, std::slice::from_ref(&topic))
        .await?
        .remove(&topic.teacher_id)
        .unwrap_or_default();
    let selected = viewer_selection(db, viewer).await?;
    Ok(view(topic, name, selected))
}

pub async fn create(
    db: &DatabaseConnection,
    actor: &Actor,
    params: CreateTopic,
) -> ServiceResult<topic::Model> {
    if !(actor.is_teacher() || actor.is_admin()) {
        return Err(ServiceError::unauthorized("Only teachers may publish topics"));
    }
    let title = validate_title(&params.title)?;
    if params.max_students < 1 {
        return Err(ServiceError::validation("max_students must be at least 1"));
    }

    let created = topic::Model::create(
        db,
        actor.id,
        &title,
        params.topic_type,
        params.difficulty,
        blank_to_none(params.description),
        blank_to_none(params.requirements),
        params.max_students,
    )
    .await?;

    tracing::info!(topic_id = created.id, teacher_id = actor.id, "Topic created");
    Ok(created)
}

pub async fn update(
    db: &DatabaseConnection,
    actor: &Actor,
    topic_id: i64,
    params: UpdateTopic,
) -> ServiceResult<topic::Model> {
    let existing = find_topic_or_404(db, topic_id).await?;
    ensure_can_manage(actor, &existing)?;

    if params.max_students.is_some_and(|max| max < 1) {
        return Err(ServiceError::validation("max_students must be at least 1"));
    }

    let mut active = existing.into_active_model();
    if let Some(title) = params.title {
        active.title = Set(validate_title(&title)?);
    }
    if let Some(t) = params.topic_type {
        active.topic_type = Set(t);
    }
    if let Some(d) = params.difficulty {
        active.difficulty = Set(d);
    }
    if let Some(desc) = params.description {
        active.description = Set(blank_to_none(Some(desc)));
    }
    if let Some(req) = params.requirements {
        active.requirements = Set(blank_to_none(Some(req)));
    }
    if let Some(max) = params.max_students {
        active.max_students = Set(max);
    }
    active.updated_at = Set(Utc::now());

    // Guarded on the live selected_count so a concurrent select cannot slip
    // under a lowered capacity.
    let mut guarded = topic::Entity::update_many()
        .set(active)
        .filter(topic::Column::Id.eq(topic_id));
    if let Some(max) = params.max_students {
        guarded = guarded.filter(topic::Column::SelectedCount.lte(max));
    }
    let result = guarded.exec(db).await?;

    let current = find_topic_or_404(db, topic_id).await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::validation(format!(
            "max_students cannot be lower than the {} students who already selected this topic",
            current.selected_count
        )));
    }

    tracing::info!(topic_id, actor = actor.id, "Topic updated");
    Ok(current)
}

/// Deletes a topic nobody has selected.
///
/// The delete itself is guarded on `selected_count = 0`, so a selection racing
/// with the delete either lands first (and the delete fails) or finds no topic.
pub async fn delete(db: &DatabaseConnection, actor: &Actor, topic_id: i64) -> ServiceResult<()> {
    let existing = find_topic_or_404(db, topic_id).await?;
    ensure_can_manage(actor, &existing)?;

    if existing.selected_count > 0 {
        return Err(ServiceError::TopicInUse);
    }

    let result = topic::Entity::delete_many()
        .filter(topic::Column::Id.eq(topic_id))
        .filter(topic::Column::SelectedCount.eq(0))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::TopicInUse);
    }

    tracing::info!(topic_id, actor = actor.id, "Topic deleted");
    Ok(())
}

pub async fn select<S>(
    store: &S,
    student_id: i64,
    topic_id: i64,
) -> ServiceResult<topic_selection::Model>
where
    S: TopicStore + ?Sized,
{
    match store.select_topic(student_id, topic_id).await? {
        SelectOutcome::Selected(selection) => {
            tracing::info!(student_id, topic_id, "Topic selected");
            Ok(selection)
        }
        SelectOutcome::AlreadySelected => Err(ServiceError::AlreadySelected),
        SelectOutcome::TopicMissing => Err(ServiceError::not_found("Topic not found")),
        SelectOutcome::Full => Err(ServiceError::CapacityExceeded),
    }
}

pub async fn deselect<S>(store: &S, student_id: i64, topic_id: i64) -> ServiceResult<()>
where
    S: TopicStore + ?Sized,
{
    if store.deselect_topic(student_id, topic_id).await? {
        tracing::info!(student_id, topic_id, "Topic selection removed");
        Ok(())
    } else {
        Err(ServiceError::not_found("No selection of this topic found"))
    }
}

/// Topics owned by a teacher, each with the students holding it.
pub async fn my_topics(db: &DatabaseConnection, teacher: &Actor) -> ServiceResult<Vec<OwnedTopic>> {
    let topics = topic::Model::find_by_teacher(db, teacher.id).await?;
    let teacher_name = user::Model::get_by_id(db, teacher.id)
        .await?
        .map(|u| u.name)
        .unwrap_or_default();

    let topic_ids: Vec<i64> = topics.iter().map(|t| t.id).collect();
    let rows = if topic_ids.is_empty() {
        Vec::new()
    } else {
        topic_selection::Entity::find()
            .filter(topic_selection::Column::TopicId.is_in(topic_ids))
            .order_by_asc(topic_selection::Column::SelectedAt)
            .find_also_related(user::Entity)
            .all(db)
            .await?
    };

    let mut by_topic: HashMap<i64, Vec<SelectingStudent>> = HashMap::new();
    for (selection, student) in rows {
        if let Some(student) = student {
            by_topic
                .entry(selection.topic_id)
                .or_default()
                .push(SelectingStudent {
                    id: student.id,
                    username: student.username,
                    name: student.name,
                    email: student.email,
                    selected_at: selection.selected_at,
                });
        }
    }

    Ok(topics
        .into_iter()
        .map(|t| {
            let students = by_topic.remove(&t.id).unwrap_or_default();
            OwnedTopic {
                topic: view(t, teacher_name.clone(), None),
                students,
            }
        })
        .collect())
}
