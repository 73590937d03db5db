use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    defense::DefenseSeeder, process_stage::ProcessStageSeeder, selection::SelectionSeeder,
    submission::SubmissionSeeder, topic::TopicSeeder, user::UserSeeder,
};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await.expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(TopicSeeder), "Topic"),
        (Box::new(SelectionSeeder), "TopicSelection"),
        (Box::new(SubmissionSeeder), "Submission"),
        (Box::new(ProcessStageSeeder), "ProcessStage"),
        (Box::new(DefenseSeeder), "Defense"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
