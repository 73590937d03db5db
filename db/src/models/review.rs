use super::submission::Stage;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A teacher's verdict on a submission.
///
/// `stage` is copied from the submission at creation time so that progress can
/// be derived without joining back.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub stage: Stage,
    pub reviewer_id: i64,
    /// 0..=100
    pub score: i32,
    #[sea_orm(column_type = "Text")]
    pub feedback: String,
    pub result: ReviewResult,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "review_result")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReviewResult {
    #[sea_orm(string_value = "pass")]
    Pass,

    #[sea_orm(string_value = "revise")]
    Revise,

    #[sea_orm(string_value = "fail")]
    Fail,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submission::Entity",
        from = "Column::SubmissionId",
        to = "super::submission::Column::Id"
    )]
    Submission,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReviewerId",
        to = "super::user::Column::Id"
    )]
    Reviewer,
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        submission_id: i64,
        stage: Stage,
        reviewer_id: i64,
        score: i32,
        feedback: &str,
        result: ReviewResult,
    ) -> Result<Self, DbErr> {
        ActiveModel {
            submission_id: Set(submission_id),
            stage: Set(stage),
            reviewer_id: Set(reviewer_id),
            score: Set(score),
            feedback: Set(feedback.to_owned()),
            result: Set(result),
            reviewed_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Reviews of the given submissions, newest first.
    pub async fn find_for_submissions(
        db: &DatabaseConnection,
        submission_ids: &[i64],
    ) -> Result<Vec<Self>, DbErr> {
        if submission_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::SubmissionId.is_in(submission_ids.iter().copied()))
            .order_by_desc(Column::ReviewedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }
}
