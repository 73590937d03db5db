//! Thesis progress derivation.
//!
//! [`compute_progress`] turns a student's submissions and reviews into a
//! per-stage status. It reads nothing from the database and writes nothing;
//! callers fetch the records (see [`crate::stores`]) and pass them in. Every
//! place that reports progress (the progress endpoint, teacher student lists,
//! dashboards, statistics) goes through this one function.
//!
//! Rules per document stage:
//! - the most recent review wins (`reviewed_at`, then higher id):
//!   `pass` completes the stage, `revise` keeps it in progress with the note
//!   "needs revision", `fail` marks it failed;
//! - a submission with no review is in progress, "under review";
//! - nothing at all is pending.
//!
//! `topic_selection` is completed exactly when an active selection exists.

use crate::models::review::{self, ReviewResult};
use crate::models::submission::{self, Stage};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

pub const NOTE_NEEDS_REVISION: &str = "needs revision";
pub const NOTE_UNDER_REVIEW: &str = "under review";

/// The six progress keys, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    TopicSelection,
    Proposal,
    Midterm,
    FirstReview,
    SecondReview,
    FinalSubmission,
}

impl ProgressStage {
    pub const ALL: [ProgressStage; 6] = [
        ProgressStage::TopicSelection,
        ProgressStage::Proposal,
        ProgressStage::Midterm,
        ProgressStage::FirstReview,
        ProgressStage::SecondReview,
        ProgressStage::FinalSubmission,
    ];

    /// The document stage backing this key; `None` for topic selection.
    pub fn document_stage(self) -> Option<Stage> {
        match self {
            ProgressStage::TopicSelection => None,
            ProgressStage::Proposal => Some(Stage::Proposal),
            ProgressStage::Midterm => Some(Stage::Midterm),
            ProgressStage::FirstReview => Some(Stage::FirstReview),
            ProgressStage::SecondReview => Some(Stage::SecondReview),
            ProgressStage::FinalSubmission => Some(Stage::FinalSubmission),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ProgressStage::TopicSelection => "topic_selection",
            ProgressStage::Proposal => "proposal",
            ProgressStage::Midterm => "midterm",
            ProgressStage::FirstReview => "first_review",
            ProgressStage::SecondReview => "second_review",
            ProgressStage::FinalSubmission => "final_submission",
        }
    }
}

impl From<Stage> for ProgressStage {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Proposal => ProgressStage::Proposal,
            Stage::Midterm => ProgressStage::Midterm,
            Stage::FirstReview => ProgressStage::FirstReview,
            Stage::SecondReview => ProgressStage::SecondReview,
            Stage::FinalSubmission => ProgressStage::FinalSubmission,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

/// Derived status of a single submission, from its own reviews only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    PendingReview,
    Passed,
    NeedsRevision,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StageProgress {
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub submission_id: Option<i64>,
    pub submission_title: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub result: Option<ReviewResult>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Per-stage progress plus the completion summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    #[serde(serialize_with = "serialize_stages")]
    pub stages: [StageProgress; 6],
    pub completed_stages: usize,
    pub total_stages: usize,
    pub completion_percent: u32,
}

fn serialize_stages<S: Serializer>(
    stages: &[StageProgress; 6],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(stages.len()))?;
    for (key, stage) in ProgressStage::ALL.iter().zip(stages.iter()) {
        map.serialize_entry(key.key(), stage)?;
    }
    map.end()
}

impl Progress {
    pub fn stage(&self, key: ProgressStage) -> &StageProgress {
        let idx = ProgressStage::ALL
            .iter()
            .position(|k| *k == key)
            .unwrap_or_default();
        &self.stages[idx]
    }

    pub fn is_completed(&self, key: ProgressStage) -> bool {
        self.stage(key).status == StageStatus::Completed
    }
}

/// Newest first by timestamp, ties broken by the higher id.
fn latest_review<'a, I>(reviews: I) -> Option<&'a review::Model>
where
    I: IntoIterator<Item = &'a review::Model>,
{
    reviews
        .into_iter()
        .max_by_key(|r| (r.reviewed_at, r.id))
}

fn latest_submission<'a, I>(submissions: I) -> Option<&'a submission::Model>
where
    I: IntoIterator<Item = &'a submission::Model>,
{
    submissions
        .into_iter()
        .max_by_key(|s| (s.submitted_at, s.id))
}

/// Status of one submission given the reviews written against it.
///
/// Reviews for other submissions are ignored, so callers may pass a
/// student's full review list.
pub fn submission_status(submission_id: i64, reviews: &[review::Model]) -> SubmissionStatus {
    match latest_review(reviews.iter().filter(|r| r.submission_id == submission_id)) {
        None => SubmissionStatus::PendingReview,
        Some(r) => match r.result {
            ReviewResult::Pass => SubmissionStatus::Passed,
            ReviewResult::Revise => SubmissionStatus::NeedsRevision,
            ReviewResult::Fail => SubmissionStatus::Failed,
        },
    }
}

fn document_stage_progress(
    stage: Stage,
    submissions: &[submission::Model],
    reviews: &[review::Model],
) -> StageProgress {
    let latest_sub = latest_submission(submissions.iter().filter(|s| s.stage == stage));
    let latest_rev = latest_review(reviews.iter().filter(|r| r.stage == stage));

    let mut out = StageProgress {
        submission_id: latest_sub.map(|s| s.id),
        submission_title: latest_sub.map(|s| s.title.clone()),
        submitted_at: latest_sub.map(|s| s.submitted_at),
        ..Default::default()
    };

    match (latest_rev, latest_sub) {
        (Some(r), _) => {
            out.result = Some(r.result);
            out.score = Some(r.score);
            out.feedback = Some(r.feedback.clone());
            match r.result {
                ReviewResult::Pass => {
                    out.status = StageStatus::Completed;
                    out.completed_at = Some(r.reviewed_at);
                }
                ReviewResult::Revise => {
                    out.status = StageStatus::InProgress;
                    out.note = Some(NOTE_NEEDS_REVISION.to_string());
                }
                ReviewResult::Fail => {
                    out.status = StageStatus::Failed;
                }
            }
        }
        (None, Some(_)) => {
            out.status = StageStatus::InProgress;
            out.note = Some(NOTE_UNDER_REVIEW.to_string());
        }
        (None, None) => {}
    }

    out
}

/// Derives a student's progress. Inputs are not required to be sorted.
pub fn compute_progress(
    has_selection: bool,
    submissions: &[submission::Model],
    reviews: &[review::Model],
) -> Progress {
    let stages = ProgressStage::ALL.map(|key| match key.document_stage() {
        None => StageProgress {
            status: if has_selection {
                StageStatus::Completed
            } else {
                StageStatus::Pending
            },
            ..Default::default()
        },
        Some(stage) => document_stage_progress(stage, submissions, reviews),
    });

    let completed_stages = stages
        .iter()
        .filter(|s| s.status == StageStatus::Completed)
        .count();
    let total_stages = stages.len();

    Progress {
        stages,
        completed_stages,
        total_stages,
        completion_percent: (100 * completed_stages / total_stages) as u32,
    }
}
