use crate::seed::Seeder;
use chrono::NaiveDate;
use db::models::defense_committee_member::CommitteeRole;
use db::models::user::{Model as UserModel, Role};
use sea_orm::DatabaseConnection;
use services::{
    ServiceError, ServiceResult,
    defense::{self as defense_service, CommitteeEntry, CreateSlot, StudentEntry},
};
use std::pin::Pin;

pub struct DefenseSeeder;

impl Seeder for DefenseSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let teachers = UserModel::find_by_role(db, Role::Teacher).await?;
            let students = UserModel::find_by_role(db, Role::Student).await?;

            let committee = teachers
                .iter()
                .take(3)
                .enumerate()
                .map(|(i, t)| CommitteeEntry {
                    member_id: t.id,
                    role: if i == 0 {
                        CommitteeRole::Chair
                    } else {
                        CommitteeRole::Member
                    },
                })
                .collect();

            // 20 minute slots from 09:00.
            let students = students
                .iter()
                .take(5)
                .enumerate()
                .map(|(i, s)| {
                    let minutes = 9 * 60 + 20 * i;
                    StudentEntry {
                        student_id: s.id,
                        scheduled_time: Some(format!("{:02}:{:02}", minutes / 60, minutes % 60)),
                    }
                })
                .collect();

            let date = NaiveDate::from_ymd_opt(2025, 6, 25)
                .ok_or_else(|| ServiceError::validation("Invalid defense date"))?;
            defense_service::create_slot(
                db,
                CreateSlot {
                    date,
                    time_range: "09:00-11:00".to_string(),
                    location: "Engineering Building, Room 301".to_string(),
                    group_name: Some("Group A".to_string()),
                    committee,
                    students,
                },
            )
            .await?;

            Ok(())
        })
    }
}
