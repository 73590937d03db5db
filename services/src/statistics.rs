//! Portal-wide aggregates for administrators.
//!
//! Stage figures come from running the progress derivation over every
//! student, so they agree with what each student sees on their own page.

use crate::ServiceResult;
use crate::progress::student_progress;
use db::models::{
    review::ReviewResult,
    topic::{self, TopicType},
    topic_selection,
    user::{self, Role},
};
use db::progress::{Progress, ProgressStage, StageStatus};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Iterable, PaginatorTrait, QueryFilter,
};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UserCounts {
    pub students: u64,
    pub teachers: u64,
    pub admins: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopicTypeCount {
    pub topic_type: TopicType,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StageStats {
    pub stage: ProgressStage,
    pub submitted: u64,
    pub reviewed: u64,
    pub passed: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreBucket {
    pub range: &'static str,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Statistics {
    pub users: UserCounts,
    pub total_topics: u64,
    pub topics_by_type: Vec<TopicTypeCount>,
    pub total_selections: u64,
    pub stages: Vec<StageStats>,
    pub average_completion: f64,
    pub average_passing_score: Option<f64>,
    pub score_distribution: Vec<ScoreBucket>,
}

const BUCKETS: [(&str, i32, i32); 5] = [
    ("90-100", 90, 100),
    ("80-89", 80, 89),
    ("70-79", 70, 79),
    ("60-69", 60, 69),
    ("<60", 0, 59),
];

pub(crate) fn bucket_index(score: i32) -> usize {
    BUCKETS
        .iter()
        .position(|(_, lo, hi)| (*lo..=*hi).contains(&score))
        .unwrap_or(BUCKETS.len() - 1)
}

/// Folds per-student progress into the stage, score and completion figures.
pub(crate) fn aggregate(
    progress: &[Progress],
) -> (Vec<StageStats>, f64, Option<f64>, Vec<ScoreBucket>) {
    let document_stages: Vec<ProgressStage> = ProgressStage::ALL
        .into_iter()
        .filter(|s| s.document_stage().is_some())
        .collect();

    let mut stages: Vec<StageStats> = document_stages
        .iter()
        .map(|&stage| StageStats {
            stage,
            submitted: 0,
            reviewed: 0,
            passed: 0,
            failed: 0,
        })
        .collect();
    let mut buckets = [0u64; 5];
    let mut pass_total = 0i64;
    let mut pass_count = 0i64;

    for p in progress {
        for stats in stages.iter_mut() {
            let s = p.stage(stats.stage);
            if s.submission_id.is_some() {
                stats.submitted += 1;
            }
            if let (Some(result), Some(score)) = (s.result, s.score) {
                stats.reviewed += 1;
                buckets[bucket_index(score)] += 1;
                if result == ReviewResult::Pass {
                    pass_total += i64::from(score);
                    pass_count += 1;
                }
            }
            match s.status {
                StageStatus::Completed => stats.passed += 1,
                StageStatus::Failed => stats.failed += 1,
                _ => {}
            }
        }
    }

    let average_completion = if progress.is_empty() {
        0.0
    } else {
        let sum: u32 = progress.iter().map(|p| p.completion_percent).sum();
        f64::from(sum) / progress.len() as f64
    };
    let average_passing_score = (pass_count > 0).then(|| pass_total as f64 / pass_count as f64);

    let distribution = BUCKETS
        .iter()
        .zip(buckets)
        .map(|((range, _, _), count)| ScoreBucket {
            range: *range,
            count,
        })
        .collect();

    (stages, average_completion, average_passing_score, distribution)
}

pub async fn statistics(db: &DatabaseConnection) -> ServiceResult<Statistics> {
    let count_role = |role: Role| {
        user::Entity::find()
            .filter(user::Column::Role.eq(role))
            .count(db)
    };
    let users = UserCounts {
        students: count_role(Role::Student).await?,
        teachers: count_role(Role::Teacher).await?,
        admins: count_role(Role::Admin).await?,
    };

    let total_topics = topic::Entity::find().count(db).await?;
    let mut topics_by_type = Vec::new();
    for topic_type in TopicType::iter() {
        let count = topic::Entity::find()
            .filter(topic::Column::TopicType.eq(topic_type))
            .count(db)
            .await?;
        topics_by_type.push(TopicTypeCount { topic_type, count });
    }
    let total_selections = topic_selection::Entity::find().count(db).await?;

    let students = user::Model::find_by_role(db, Role::Student).await?;
    let mut progress = Vec::with_capacity(students.len());
    for s in &students {
        progress.push(student_progress(db, s.id).await?);
    }
    let (stages, average_completion, average_passing_score, score_distribution) =
        aggregate(&progress);

    Ok(Statistics {
        users,
        total_topics,
        topics_by_type,
        total_selections,
        stages,
        average_completion,
        average_passing_score,
        score_distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use db::models::{review, submission::{self, Stage}};
    use db::progress::compute_progress;

    fn sub(id: i64, stage: Stage) -> submission::Model {
        submission::Model {
            id,
            student_id: 1,
            title: "t".into(),
            stage,
            file_reference: "f".into(),
            original_filename: "f.pdf".into(),
            submitted_at: Utc::now(),
        }
    }

    fn rev(id: i64, sid: i64, stage: Stage, result: ReviewResult, score: i32) -> review::Model {
        review::Model {
            id,
            submission_id: sid,
            stage,
            reviewer_id: 2,
            score,
            feedback: "f".into(),
            result,
            reviewed_at: Utc::now(),
        }
    }

    #[test]
    fn buckets_cover_the_whole_range() {
        assert_eq!(bucket_index(100), 0);
        assert_eq!(bucket_index(90), 0);
        assert_eq!(bucket_index(89), 1);
        assert_eq!(bucket_index(60), 3);
        assert_eq!(bucket_index(0), 4);
    }

    #[test]
    fn aggregate_counts_latest_outcomes() {
        let a = compute_progress(
            true,
            &[sub(1, Stage::Proposal), sub(2, Stage::Midterm)],
            &[
                rev(10, 1, Stage::Proposal, ReviewResult::Pass, 92),
                rev(11, 2, Stage::Midterm, ReviewResult::Fail, 40),
            ],
        );
        let b = compute_progress(
            false,
            &[sub(3, Stage::Proposal)],
            &[rev(12, 3, Stage::Proposal, ReviewResult::Pass, 78)],
        );

        let (stages, avg_completion, avg_pass, dist) = aggregate(&[a, b]);

        let proposal = &stages[0];
        assert_eq!(proposal.stage, ProgressStage::Proposal);
        assert_eq!(proposal.submitted, 2);
        assert_eq!(proposal.reviewed, 2);
        assert_eq!(proposal.passed, 2);
        let midterm = &stages[1];
        assert_eq!(midterm.failed, 1);

        assert_eq!(avg_pass, Some(85.0));
        // 2/6 -> 33 and 1/6 -> 16
        assert!((avg_completion - 24.5).abs() < f64::EPSILON);
        assert_eq!(dist[0].count, 1);
        assert_eq!(dist[2].count, 1);
        assert_eq!(dist[4].count, 1);
    }

    #[test]
    fn aggregate_of_nobody_is_zeroed() {
        let (stages, avg, pass, dist) = aggregate(&[]);
        assert_eq!(stages.len(), 5);
        assert_eq!(avg, 0.0);
        assert!(pass.is_none());
        assert!(dist.iter().all(|b| b.count == 0));
    }
}
