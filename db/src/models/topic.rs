use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A thesis topic published by a teacher.
///
/// `selected_count` mirrors the number of `topic_selections` rows pointing at
/// the topic and never exceeds `max_students` (enforced by a CHECK constraint
/// and by the guarded update in [`Model::try_claim_seat`]).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub topic_type: TopicType,
    pub difficulty: Difficulty,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub max_students: i32,
    pub selected_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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
    Default,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "topic_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TopicType {
    #[default]
    #[sea_orm(string_value = "applied_research")]
    AppliedResearch,

    #[sea_orm(string_value = "theoretical_research")]
    TheoreticalResearch,

    #[sea_orm(string_value = "system_design")]
    SystemDesign,

    #[sea_orm(string_value = "algorithm_design")]
    AlgorithmDesign,
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
    Default,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "topic_difficulty")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[sea_orm(string_value = "easy")]
    Easy,

    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,

    #[sea_orm(string_value = "hard")]
    Hard,
}

/// Derived availability; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TopicStatus {
    Open,
    Full,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,

    #[sea_orm(has_many = "super::topic_selection::Entity")]
    Selections,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::topic_selection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Selections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        teacher_id: i64,
        title: &str,
        topic_type: TopicType,
        difficulty: Difficulty,
        description: Option<String>,
        requirements: Option<String>,
        max_students: i32,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(title.to_owned()),
            topic_type: Set(topic_type),
            difficulty: Set(difficulty),
            description: Set(description),
            requirements: Set(requirements),
            max_students: Set(max_students),
            selected_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub fn status(&self) -> TopicStatus {
        if self.selected_count < self.max_students {
            TopicStatus::Open
        } else {
            TopicStatus::Full
        }
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.teacher_id == user_id
    }

    pub async fn find_by_teacher(
        db: &DatabaseConnection,
        teacher_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Takes one seat on the topic if one is free.
    ///
    /// Runs a single `UPDATE ... WHERE selected_count < max_students`, so two
    /// concurrent callers can never both succeed on the last seat. Returns
    /// whether a row was updated.
    pub async fn try_claim_seat<C: ConnectionTrait>(db: &C, topic_id: i64) -> Result<bool, DbErr> {
        let result = Entity::update_many()
            .col_expr(
                Column::SelectedCount,
                Expr::col(Column::SelectedCount).add(1),
            )
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(topic_id))
            .filter(Expr::col(Column::SelectedCount).lt(Expr::col(Column::MaxStudents)))
            .exec(db)
            .await?;
        Ok(result.rows_affected == 1)
    }

    /// Gives a seat back. Never drives the count below zero.
    pub async fn release_seat<C: ConnectionTrait>(db: &C, topic_id: i64) -> Result<bool, DbErr> {
        let result = Entity::update_many()
            .col_expr(
                Column::SelectedCount,
                Expr::col(Column::SelectedCount).sub(1),
            )
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(topic_id))
            .filter(Column::SelectedCount.gt(0))
            .exec(db)
            .await?;
        Ok(result.rows_affected == 1)
    }
}
