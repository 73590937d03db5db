use crate::{ServiceError, ServiceResult};
use chrono::{NaiveDate, Utc};
use db::models::process_stage::{self, ProcessStatus};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

#[derive(Debug, Clone)]
pub struct CreateProcessStage {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<ProcessStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProcessStage {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ProcessStatus>,
}

fn check_dates(start: NaiveDate, end: NaiveDate) -> ServiceResult<()> {
    if end < start {
        return Err(ServiceError::validation(
            "end_date must not be before start_date",
        ));
    }
    Ok(())
}

pub async fn list(db: &DatabaseConnection) -> ServiceResult<Vec<process_stage::Model>> {
    Ok(process_stage::Model::list(db).await?)
}

pub async fn create(
    db: &DatabaseConnection,
    params: CreateProcessStage,
) -> ServiceResult<process_stage::Model> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("Name is required"));
    }
    check_dates(params.start_date, params.end_date)?;

    let stage = process_stage::Model::create(
        db,
        name,
        params.start_date,
        params.end_date,
        params.status.unwrap_or_default(),
    )
    .await?;
    tracing::info!(stage_id = stage.id, name = %stage.name, "Process stage created");
    Ok(stage)
}

pub async fn update(
    db: &DatabaseConnection,
    stage_id: i64,
    params: UpdateProcessStage,
) -> ServiceResult<process_stage::Model> {
    let existing = process_stage::Entity::find_by_id(stage_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Process stage not found"))?;

    check_dates(
        params.start_date.unwrap_or(existing.start_date),
        params.end_date.unwrap_or(existing.end_date),
    )?;

    let mut active = existing.into_active_model();
    if let Some(name) = params.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::validation("Name is required"));
        }
        active.name = Set(name);
    }
    if let Some(start) = params.start_date {
        active.start_date = Set(start);
    }
    if let Some(end) = params.end_date {
        active.end_date = Set(end);
    }
    if let Some(status) = params.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(db).await?;
    tracing::info!(stage_id, status = %updated.status, "Process stage updated");
    Ok(updated)
}
