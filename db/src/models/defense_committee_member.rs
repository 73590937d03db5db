use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A teacher sitting on a defense committee. `position` orders the committee.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "defense_committee_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub slot_id: i64,
    pub member_id: i64,
    pub role: CommitteeRole,
    pub position: i32,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "committee_role")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommitteeRole {
    #[sea_orm(string_value = "chair")]
    Chair,

    #[default]
    #[sea_orm(string_value = "member")]
    Member,

    #[sea_orm(string_value = "secretary")]
    Secretary,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::defense_slot::Entity",
        from = "Column::SlotId",
        to = "super::defense_slot::Column::Id"
    )]
    Slot,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MemberId",
        to = "super::user::Column::Id"
    )]
    Member,
}

impl Related<super::defense_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Slot.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
