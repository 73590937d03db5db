//! Defense slot scheduling.
//!
//! Slots carry an ordered committee and an ordered list of students. Both lists
//! are replaced wholesale; nothing checks for double-booking.

use crate::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use db::models::{
    defense_committee_member::{self, CommitteeRole},
    defense_slot, defense_student,
    user::{self, Role},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct CommitteeEntry {
    pub member_id: i64,
    pub role: CommitteeRole,
}

#[derive(Debug, Clone)]
pub struct StudentEntry {
    pub student_id: i64,
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateSlot {
    pub date: NaiveDate,
    pub time_range: String,
    pub location: String,
    pub group_name: Option<String>,
    pub committee: Vec<CommitteeEntry>,
    pub students: Vec<StudentEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitteeView {
    pub member_id: i64,
    pub name: String,
    pub role: CommitteeRole,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefenseStudentView {
    pub student_id: i64,
    pub username: String,
    pub name: String,
    pub order_index: i32,
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    #[serde(flatten)]
    pub slot: defense_slot::Model,
    pub committee: Vec<CommitteeView>,
    pub students: Vec<DefenseStudentView>,
}

/// Checks every id refers to an existing user with `role` and that no id
/// repeats.
async fn ensure_users_with_role<C: ConnectionTrait>(
    db: &C,
    ids: &[i64],
    role: Role,
) -> ServiceResult<()> {
    let unique: HashSet<i64> = ids.iter().copied().collect();
    if unique.len() != ids.len() {
        return Err(ServiceError::validation(format!(
            "Duplicate {role} in assignment list"
        )));
    }
    if ids.is_empty() {
        return Ok(());
    }

    let found: HashSet<i64> = user::Entity::find()
        .filter(user::Column::Id.is_in(ids.iter().copied()))
        .filter(user::Column::Role.eq(role))
        .all(db)
        .await?
        .into_iter()
        .map(|u| u.id)
        .collect();

    if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
        return Err(ServiceError::validation(format!(
            "User {missing} does not exist or is not a {role}"
        )));
    }
    Ok(())
}

async fn write_committee<C: ConnectionTrait>(
    db: &C,
    slot_id: i64,
    entries: &[CommitteeEntry],
) -> ServiceResult<()> {
    defense_committee_member::Entity::delete_many()
        .filter(defense_committee_member::Column::SlotId.eq(slot_id))
        .exec(db)
        .await?;
    for (i, entry) in entries.iter().enumerate() {
        defense_committee_member::ActiveModel {
            slot_id: Set(slot_id),
            member_id: Set(entry.member_id),
            role: Set(entry.role),
            position: Set(i as i32 + 1),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn write_students<C: ConnectionTrait>(
    db: &C,
    slot_id: i64,
    entries: &[StudentEntry],
) -> ServiceResult<()> {
    defense_student::Entity::delete_many()
        .filter(defense_student::Column::SlotId.eq(slot_id))
        .exec(db)
        .await?;
    for (i, entry) in entries.iter().enumerate() {
        defense_student::ActiveModel {
            slot_id: Set(slot_id),
            student_id: Set(entry.student_id),
            order_index: Set(i as i32 + 1),
            scheduled_time: Set(entry
                .scheduled_time
                .clone()
                .filter(|t| !t.trim().is_empty())),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn find_slot(db: &DatabaseConnection, slot_id: i64) -> ServiceResult<defense_slot::Model> {
    defense_slot::Entity::find_by_id(slot_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Defense slot not found"))
}

async fn build_views(
    db: &DatabaseConnection,
    slots: Vec<defense_slot::Model>,
) -> ServiceResult<Vec<SlotView>> {
    let slot_ids: Vec<i64> = slots.iter().map(|s| s.id).collect();
    if slot_ids.is_empty() {
        return Ok(Vec::new());
    }

    let committee = defense_committee_member::Entity::find()
        .filter(defense_committee_member::Column::SlotId.is_in(slot_ids.clone()))
        .order_by_asc(defense_committee_member::Column::Position)
        .find_also_related(user::Entity)
        .all(db)
        .await?;
    let students = defense_student::Entity::find()
        .filter(defense_student::Column::SlotId.is_in(slot_ids))
        .order_by_asc(defense_student::Column::OrderIndex)
        .find_also_related(user::Entity)
        .all(db)
        .await?;

    let mut committee_by_slot: HashMap<i64, Vec<CommitteeView>> = HashMap::new();
    for (member, u) in committee {
        committee_by_slot
            .entry(member.slot_id)
            .or_default()
            .push(CommitteeView {
                member_id: member.member_id,
                name: u.map(|u| u.name).unwrap_or_default(),
                role: member.role,
                position: member.position,
            });
    }

    let mut students_by_slot: HashMap<i64, Vec<DefenseStudentView>> = HashMap::new();
    for (entry, u) in students {
        let (username, name) = u.map(|u| (u.username, u.name)).unwrap_or_default();
        students_by_slot
            .entry(entry.slot_id)
            .or_default()
            .push(DefenseStudentView {
                student_id: entry.student_id,
                username,
                name,
                order_index: entry.order_index,
                scheduled_time: entry.scheduled_time,
            });
    }

    Ok(slots
        .into_iter()
        .map(|slot| SlotView {
            committee: committee_by_slot.remove(&slot.id).unwrap_or_default(),
            students: students_by_slot.remove(&slot.id).unwrap_or_default(),
            slot,
        })
        .collect())
}

async fn single_view(db: &DatabaseConnection, slot: defense_slot::Model) -> ServiceResult<SlotView> {
    build_views(db, vec![slot])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("Defense slot not found"))
}

pub async fn create_slot(db: &DatabaseConnection, params: CreateSlot) -> ServiceResult<SlotView> {
    let time_range = params.time_range.trim();
    let location = params.location.trim();
    if time_range.is_empty() || location.is_empty() {
        return Err(ServiceError::validation("Time range and location are required"));
    }

    let member_ids: Vec<i64> = params.committee.iter().map(|c| c.member_id).collect();
    let student_ids: Vec<i64> = params.students.iter().map(|s| s.student_id).collect();
    ensure_users_with_role(db, &member_ids, Role::Teacher).await?;
    ensure_users_with_role(db, &student_ids, Role::Student).await?;

    let txn = db.begin().await?;
    let slot = defense_slot::Model::create(
        &txn,
        params.date,
        time_range,
        location,
        params.group_name.filter(|g| !g.trim().is_empty()),
    )
    .await?;
    write_committee(&txn, slot.id, &params.committee).await?;
    write_students(&txn, slot.id, &params.students).await?;
    txn.commit().await?;

    tracing::info!(
        slot_id = slot.id,
        committee = member_ids.len(),
        students = student_ids.len(),
        "Defense slot created"
    );
    single_view(db, slot).await
}

pub async fn replace_committee(
    db: &DatabaseConnection,
    slot_id: i64,
    entries: Vec<CommitteeEntry>,
) -> ServiceResult<SlotView> {
    let slot = find_slot(db, slot_id).await?;
    let ids: Vec<i64> = entries.iter().map(|c| c.member_id).collect();
    ensure_users_with_role(db, &ids, Role::Teacher).await?;

    let txn = db.begin().await?;
    write_committee(&txn, slot_id, &entries).await?;
    txn.commit().await?;

    tracing::info!(slot_id, members = ids.len(), "Defense committee replaced");
    single_view(db, slot).await
}

pub async fn replace_students(
    db: &DatabaseConnection,
    slot_id: i64,
    entries: Vec<StudentEntry>,
) -> ServiceResult<SlotView> {
    let slot = find_slot(db, slot_id).await?;
    let ids: Vec<i64> = entries.iter().map(|s| s.student_id).collect();
    ensure_users_with_role(db, &ids, Role::Student).await?;

    let txn = db.begin().await?;
    write_students(&txn, slot_id, &entries).await?;
    txn.commit().await?;

    tracing::info!(slot_id, students = ids.len(), "Defense students replaced");
    single_view(db, slot).await
}

pub async fn list_slots(db: &DatabaseConnection) -> ServiceResult<Vec<SlotView>> {
    let slots = defense_slot::Entity::find()
        .order_by_asc(defense_slot::Column::Date)
        .order_by_asc(defense_slot::Column::Id)
        .all(db)
        .await?;
    build_views(db, slots).await
}

pub async fn get_slot(db: &DatabaseConnection, slot_id: i64) -> ServiceResult<SlotView> {
    let slot = find_slot(db, slot_id).await?;
    single_view(db, slot).await
}

/// Slots a user takes part in: as an assigned student or as a committee member.
pub async fn slots_for_user(
    db: &DatabaseConnection,
    user_id: i64,
    role: Role,
) -> ServiceResult<Vec<SlotView>> {
    let slot_ids: Vec<i64> = match role {
        Role::Student => defense_student::Entity::find()
            .filter(defense_student::Column::StudentId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|s| s.slot_id)
            .collect(),
        Role::Teacher => defense_committee_member::Entity::find()
            .filter(defense_committee_member::Column::MemberId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|m| m.slot_id)
            .collect(),
        Role::Admin => return list_slots(db).await,
    };

    if slot_ids.is_empty() {
        return Ok(Vec::new());
    }
    let slots = defense_slot::Entity::find()
        .filter(defense_slot::Column::Id.is_in(slot_ids))
        .order_by_asc(defense_slot::Column::Date)
        .order_by_asc(defense_slot::Column::Id)
        .all(db)
        .await?;
    build_views(db, slots).await
}
