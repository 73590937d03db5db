use crate::seed::Seeder;
use chrono::NaiveDate;
use db::models::process_stage::ProcessStatus;
use sea_orm::DatabaseConnection;
use services::{
    ServiceError, ServiceResult,
    process_stage::{self as process_stage_service, CreateProcessStage},
};
use std::pin::Pin;

pub struct ProcessStageSeeder;

const STAGES: [(&str, (u32, u32), (u32, u32), ProcessStatus); 6] = [
    ("Topic selection", (2, 17), (3, 7), ProcessStatus::Completed),
    ("Proposal", (3, 10), (4, 4), ProcessStatus::Completed),
    ("Midterm check", (4, 21), (5, 16), ProcessStatus::InProgress),
    ("First review", (5, 19), (6, 6), ProcessStatus::Pending),
    ("Second review", (6, 9), (6, 20), ProcessStatus::Pending),
    ("Defense", (6, 23), (7, 4), ProcessStatus::Pending),
];

fn date(year: i32, (month, day): (u32, u32)) -> ServiceResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ServiceError::validation(format!("Invalid date {year}-{month}-{day}")))
}

impl Seeder for ProcessStageSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<()>> + Send + 'a>> {
        Box::pin(async move {
            for (name, start, end, status) in STAGES {
                process_stage_service::create(
                    db,
                    CreateProcessStage {
                        name: name.to_string(),
                        start_date: date(2025, start)?,
                        end_date: date(2025, end)?,
                        status: Some(status),
                    },
                )
                .await?;
            }
            Ok(())
        })
    }
}
