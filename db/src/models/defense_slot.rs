use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "defense_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: NaiveDate,
    /// Free text such as `09:00-12:00`.
    pub time_range: String,
    pub location: String,
    pub group_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::defense_committee_member::Entity")]
    Committee,

    #[sea_orm(has_many = "super::defense_student::Entity")]
    Students,
}

impl Related<super::defense_committee_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Committee.def()
    }
}

impl Related<super::defense_student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        date: NaiveDate,
        time_range: &str,
        location: &str,
        group_name: Option<String>,
    ) -> Result<Self, DbErr> {
        ActiveModel {
            date: Set(date),
            time_range: Set(time_range.to_owned()),
            location: Set(location.to_owned()),
            group_name: Set(group_name),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
