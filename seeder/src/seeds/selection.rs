use crate::seed::Seeder;
use db::models::topic;
use db::models::user::{Model as UserModel, Role};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use sea_orm::{DatabaseConnection, EntityTrait};
use services::{ServiceError, ServiceResult, topic as topic_service};
use std::pin::Pin;

pub struct SelectionSeeder;

impl Seeder for SelectionSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_entropy();
            let topic_ids: Vec<i64> = topic::Entity::find()
                .all(db)
                .await?
                .into_iter()
                .map(|t| t.id)
                .collect();
            if topic_ids.is_empty() {
                return Ok(());
            }

            // Roughly three in four students pick something.
            for student in UserModel::find_by_role(db, Role::Student).await? {
                if fastrand::u8(..4) == 0 {
                    continue;
                }
                let mut candidates = topic_ids.clone();
                candidates.shuffle(&mut rng);
                for topic_id in candidates {
                    match topic_service::select(db, student.id, topic_id).await {
                        Ok(_) | Err(ServiceError::AlreadySelected) => break,
                        Err(ServiceError::CapacityExceeded) => continue,
                        Err(e) => return Err(e),
                    }
                }
            }

            Ok(())
        })
    }
}
