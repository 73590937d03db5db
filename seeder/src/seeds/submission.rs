use crate::seed::Seeder;
use db::models::submission::SubmissionKind;
use db::models::topic;
use db::models::topic_selection;
use db::models::user::{Model as UserModel, Role};
use fake::{Fake, faker::lorem::en::Sentence};
use sea_orm::{DatabaseConnection, EntityTrait};
use services::{
    Actor, ServiceResult,
    review::{self as review_service, ReviewInput},
    submission::{self as submission_service, SubmissionUpload},
};
use std::pin::Pin;

pub struct SubmissionSeeder;

fn upload(title: &str, stage: Option<&str>) -> SubmissionUpload {
    SubmissionUpload {
        title: Some(title.to_string()),
        stage: stage.map(str::to_string),
        filename: Some(format!("{}.pdf", title.to_lowercase().replace(' ', "_"))),
        bytes: b"%PDF-1.4\n% seeded document\n".to_vec(),
    }
}

fn verdict(score: i64) -> &'static str {
    match score {
        70.. => "pass",
        55..=69 => "revise",
        _ => "fail",
    }
}

impl Seeder for SubmissionSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ServiceResult<()>> + Send + 'a>> {
        Box::pin(async move {
            for student in UserModel::find_by_role(db, Role::Student).await? {
                let Some(selection) = topic_selection::Model::find_for_student(db, student.id).await?
                else {
                    continue;
                };
                let Some(supervisor) = topic::Entity::find_by_id(selection.topic_id)
                    .one(db)
                    .await?
                    .map(|t| Actor::new(t.teacher_id, Role::Teacher))
                else {
                    continue;
                };

                let proposal = submission_service::submit(
                    db,
                    student.id,
                    SubmissionKind::Proposal,
                    upload("Research Proposal", None),
                )
                .await?;

                // Leave some proposals waiting for review.
                if fastrand::bool() {
                    continue;
                }
                let score = fastrand::i64(50..=98);
                review_service::review(
                    db,
                    &supervisor,
                    SubmissionKind::Proposal,
                    proposal.submission.id,
                    ReviewInput {
                        score,
                        feedback: Sentence(6..14).fake(),
                        result: verdict(score).to_string(),
                    },
                )
                .await?;

                if score >= 70 && fastrand::bool() {
                    submission_service::submit(
                        db,
                        student.id,
                        SubmissionKind::Midterm,
                        upload("Midterm Report", None),
                    )
                    .await?;
                }
            }

            Ok(())
        })
    }
}
