use crate::defense::{SlotView, slots_for_user};
use crate::progress::{SupervisedStudent, student_progress, supervised_students};
use crate::statistics::UserCounts;
use crate::topic::TopicView;
use crate::{Actor, ServiceError, ServiceResult, supervision};
use db::models::{
    process_stage, review, submission, topic, topic_selection,
    user::{self, Role},
};
use db::progress::Progress;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

/// Role-specific landing data. Serialized with a `role` tag.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Student {
        user: user::Model,
        topic: Option<TopicView>,
        progress: Progress,
        defense: Vec<SlotView>,
        process_stages: Vec<process_stage::Model>,
    },
    Teacher {
        user: user::Model,
        topic_count: u64,
        student_count: usize,
        pending_reviews: u64,
        students: Vec<SupervisedStudent>,
        defense: Vec<SlotView>,
    },
    Admin {
        user: user::Model,
        users: UserCounts,
        total_topics: u64,
        total_selections: u64,
        total_submissions: u64,
        pending_reviews: u64,
        process_stages: Vec<process_stage::Model>,
    },
}

/// Submissions (optionally restricted to some students) without any review.
async fn count_unreviewed(
    db: &DatabaseConnection,
    students: Option<&[i64]>,
) -> ServiceResult<u64> {
    let mut query = submission::Entity::find();
    if let Some(ids) = students {
        if ids.is_empty() {
            return Ok(0);
        }
        query = query.filter(submission::Column::StudentId.is_in(ids.iter().copied()));
    }
    let submissions = query.all(db).await?;
    let ids: Vec<i64> = submissions.iter().map(|s| s.id).collect();
    let reviews = review::Model::find_for_submissions(db, &ids).await?;
    Ok(submissions
        .iter()
        .filter(|s| !reviews.iter().any(|r| r.submission_id == s.id))
        .count() as u64)
}

async fn student_dashboard(db: &DatabaseConnection, me: user::Model) -> ServiceResult<Dashboard> {
    let topic = match topic_selection::Model::find_for_student(db, me.id).await? {
        Some(selection) => match topic::Entity::find_by_id(selection.topic_id).one(db).await? {
            Some(t) => {
                let teacher_name = user::Model::get_by_id(db, t.teacher_id)
                    .await?
                    .map(|u| u.name)
                    .unwrap_or_default();
                Some(TopicView {
                    status: t.status(),
                    is_selected: true,
                    teacher_name,
                    topic: t,
                })
            }
            None => None,
        },
        None => None,
    };

    Ok(Dashboard::Student {
        progress: student_progress(db, me.id).await?,
        defense: slots_for_user(db, me.id, Role::Student).await?,
        process_stages: process_stage::Model::list(db).await?,
        topic,
        user: me,
    })
}

async fn teacher_dashboard(db: &DatabaseConnection, me: user::Model) -> ServiceResult<Dashboard> {
    let actor = Actor::new(me.id, me.role);
    let topic_count = topic::Entity::find()
        .filter(topic::Column::TeacherId.eq(me.id))
        .count(db)
        .await?;
    let students = supervised_students(db, &actor).await?;
    let supervised = supervision::supervised_student_ids(db, me.id).await?;

    Ok(Dashboard::Teacher {
        topic_count,
        student_count: students.len(),
        pending_reviews: count_unreviewed(db, Some(&supervised)).await?,
        students,
        defense: slots_for_user(db, me.id, Role::Teacher).await?,
        user: me,
    })
}

async fn admin_dashboard(db: &DatabaseConnection, me: user::Model) -> ServiceResult<Dashboard> {
    let mut users = UserCounts::default();
    for u in user::Entity::find().all(db).await? {
        match u.role {
            Role::Student => users.students += 1,
            Role::Teacher => users.teachers += 1,
            Role::Admin => users.admins += 1,
        }
    }

    Ok(Dashboard::Admin {
        users,
        total_topics: topic::Entity::find().count(db).await?,
        total_selections: topic_selection::Entity::find().count(db).await?,
        total_submissions: submission::Entity::find().count(db).await?,
        pending_reviews: count_unreviewed(db, None).await?,
        process_stages: process_stage::Model::list(db).await?,
        user: me,
    })
}

pub async fn dashboard(db: &DatabaseConnection, actor: &Actor) -> ServiceResult<Dashboard> {
    let me = user::Model::get_by_id(db, actor.id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found"))?;

    match me.role {
        Role::Student => student_dashboard(db, me).await,
        Role::Teacher => teacher_dashboard(db, me).await,
        Role::Admin => admin_dashboard(db, me).await,
    }
}
