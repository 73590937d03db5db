use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One uploaded document at a given thesis stage. Rows are never updated;
/// resubmitting creates a new row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub title: String,
    pub stage: Stage,
    /// Path relative to the storage root.
    pub file_reference: String,
    pub original_filename: String,
    pub submitted_at: DateTime<Utc>,
}

/// Document stages, in the order a thesis normally moves through them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "submission_stage")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Stage {
    #[sea_orm(string_value = "proposal")]
    Proposal,

    #[sea_orm(string_value = "midterm")]
    Midterm,

    #[sea_orm(string_value = "first_review")]
    FirstReview,

    #[sea_orm(string_value = "second_review")]
    SecondReview,

    #[sea_orm(string_value = "final_submission")]
    FinalSubmission,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Proposal,
        Stage::Midterm,
        Stage::FirstReview,
        Stage::SecondReview,
        Stage::FinalSubmission,
    ];
}

/// The three upload endpoints. Proposals and midterms pin the stage; the
/// thesis endpoint covers the three late stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SubmissionKind {
    Proposal,
    Midterm,
    Thesis,
}

impl SubmissionKind {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            SubmissionKind::Proposal => &[Stage::Proposal],
            SubmissionKind::Midterm => &[Stage::Midterm],
            SubmissionKind::Thesis => &[
                Stage::FirstReview,
                Stage::SecondReview,
                Stage::FinalSubmission,
            ],
        }
    }

    pub fn accepts(self, stage: Stage) -> bool {
        self.stages().contains(&stage)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,

    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        student_id: i64,
        title: &str,
        stage: Stage,
        file_reference: &str,
        original_filename: &str,
    ) -> Result<Self, DbErr> {
        ActiveModel {
            student_id: Set(student_id),
            title: Set(title.to_owned()),
            stage: Set(stage),
            file_reference: Set(file_reference.to_owned()),
            original_filename: Set(original_filename.to_owned()),
            submitted_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Newest first.
    pub async fn find_for_student(
        db: &DatabaseConnection,
        student_id: i64,
        stages: &[Stage],
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Stage.is_in(stages.iter().copied()))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }
}
