use crate::seed::Seeder;
use db::models::topic::{Difficulty, TopicType};
use db::models::user::{Model as UserModel, Role};
use fake::{Fake, faker::lorem::en::Paragraph};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use sea_orm::{DatabaseConnection, Iterable};
use services::{
    Actor, ServiceResult,
    topic::{self as topic_service, CreateTopic},
};
use std::pin::Pin;

pub struct TopicSeeder;

const TITLES: [&str; 10] = [
    "Adaptive Caching for Edge Networks",
    "Formal Verification of Smart Contracts",
    "Campus Course Scheduling System",
    "Approximate Nearest Neighbour Search",
    "Energy-Aware Task Scheduling",
    "Graph Neural Networks for Fraud Detection",
    "Lock-Free Queues on Weak Memory Models",
    "Accessible Mobile Banking Interfaces",
    "Incremental Parsing for Code Editors",
    "Privacy-Preserving Federated Analytics",
];

impl Seeder for TopicSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_entropy();
            let teachers = UserModel::find_by_role(db, Role::Teacher).await?;
            let types: Vec<TopicType> = TopicType::iter().collect();
            let difficulties: Vec<Difficulty> = Difficulty::iter().collect();

            for (i, title) in TITLES.iter().enumerate() {
                let Some(teacher) = teachers.get(i % teachers.len().max(1)) else {
                    break;
                };
                let params = CreateTopic {
                    title: title.to_string(),
                    topic_type: types.choose(&mut rng).copied().unwrap_or_default(),
                    difficulty: difficulties.choose(&mut rng).copied().unwrap_or_default(),
                    description: Some(Paragraph(2..4).fake()),
                    requirements: fastrand::bool().then(|| Paragraph(1..2).fake()),
                    max_students: fastrand::i32(1..=3),
                };
                topic_service::create(db, &Actor::new(teacher.id, teacher.role), params).await?;
            }

            Ok(())
        })
    }
}
