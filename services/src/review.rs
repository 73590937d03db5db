use crate::{Actor, ServiceError, ServiceResult, submission::find_of_kind, supervision};
use db::models::{
    review::{self, ReviewResult},
    submission::SubmissionKind,
    user::Role,
};
use db::stores::{NewReview, ReviewStore, SubmissionStore, TopicStore};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub score: i64,
    pub feedback: String,
    pub result: String,
}

struct ValidReview {
    score: i32,
    feedback: String,
    result: ReviewResult,
}

fn validate(input: ReviewInput) -> ServiceResult<ValidReview> {
    if !(0..=100).contains(&input.score) {
        return Err(ServiceError::validation("Score must be between 0 and 100"));
    }
    let feedback = input.feedback.trim();
    if feedback.is_empty() {
        return Err(ServiceError::validation("Feedback is required"));
    }
    let result = ReviewResult::from_str(input.result.trim()).map_err(|_| {
        ServiceError::validation("Result must be one of: pass, revise, fail")
    })?;
    Ok(ValidReview {
        score: input.score as i32,
        feedback: feedback.to_string(),
        result,
    })
}

/// Records a verdict on a submission.
///
/// The review's stage is taken from the submission. Teachers may only review
/// students they supervise; admins may review anything. Nothing is written
/// unless every check passes.
pub async fn review<S>(
    store: &S,
    actor: &Actor,
    kind: SubmissionKind,
    submission_id: i64,
    input: ReviewInput,
) -> ServiceResult<review::Model>
where
    S: SubmissionStore + ReviewStore + TopicStore + ?Sized,
{
    let submission = find_of_kind(store, kind, submission_id).await?;
    let valid = validate(input)?;

    match actor.role {
        Role::Admin => {}
        Role::Teacher => {
            if !supervision::supervises(store, actor.id, submission.student_id).await? {
                tracing::warn!(
                    reviewer_id = actor.id,
                    student_id = submission.student_id,
                    submission_id,
                    "Review rejected: reviewer does not supervise student"
                );
                return Err(ServiceError::unauthorized(
                    "You can only review submissions of students you supervise",
                ));
            }
        }
        Role::Student => {
            return Err(ServiceError::unauthorized("Students cannot review submissions"));
        }
    }

    let created = store
        .insert_review(NewReview {
            submission_id: submission.id,
            stage: submission.stage,
            reviewer_id: actor.id,
            score: valid.score,
            feedback: valid.feedback,
            result: valid.result,
        })
        .await?;

    tracing::info!(
        review_id = created.id,
        submission_id,
        reviewer_id = actor.id,
        result = %created.result,
        score = created.score,
        "Review recorded"
    );

    Ok(created)
}
