//! Storage seams for the submission/review/topic workflow.
//!
//! The traits are implemented for the live [`DatabaseConnection`] and for
//! [`MemoryStore`], an in-process fixture used by tests that only care about
//! the workflow rules.

use crate::models::{
    review::{self, ReviewResult},
    submission::{self, Stage},
    topic, topic_selection,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub student_id: i64,
    pub title: String,
    pub stage: Stage,
    pub file_reference: String,
    pub original_filename: String,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub submission_id: i64,
    pub stage: Stage,
    pub reviewer_id: i64,
    pub score: i32,
    pub feedback: String,
    pub result: ReviewResult,
}

/// What happened when a student tried to take a topic.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Selected(topic_selection::Model),
    AlreadySelected,
    TopicMissing,
    Full,
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert_submission(&self, new: NewSubmission) -> Result<submission::Model, DbErr>;
    async fn find_submission(&self, id: i64) -> Result<Option<submission::Model>, DbErr>;
    /// All of a student's submissions, newest first.
    async fn submissions_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<submission::Model>, DbErr>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert_review(&self, new: NewReview) -> Result<review::Model, DbErr>;
    /// Every review written against any of the student's submissions, newest first.
    async fn reviews_for_student(&self, student_id: i64) -> Result<Vec<review::Model>, DbErr>;
}

#[async_trait]
pub trait TopicStore: Send + Sync {
    async fn find_topic(&self, id: i64) -> Result<Option<topic::Model>, DbErr>;
    async fn selection_for_student(
        &self,
        student_id: i64,
    ) -> Result<Option<topic_selection::Model>, DbErr>;
    /// Claims a seat and records the selection as one unit.
    async fn select_topic(&self, student_id: i64, topic_id: i64) -> Result<SelectOutcome, DbErr>;
    /// Removes the selection and frees the seat. `false` when the student does
    /// not hold this topic.
    async fn deselect_topic(&self, student_id: i64, topic_id: i64) -> Result<bool, DbErr>;
}

// --- sea-orm ---

#[async_trait]
impl SubmissionStore for DatabaseConnection {
    async fn insert_submission(&self, new: NewSubmission) -> Result<submission::Model, DbErr> {
        submission::Model::create(
            self,
            new.student_id,
            &new.title,
            new.stage,
            &new.file_reference,
            &new.original_filename,
        )
        .await
    }

    async fn find_submission(&self, id: i64) -> Result<Option<submission::Model>, DbErr> {
        submission::Entity::find_by_id(id).one(self).await
    }

    async fn submissions_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<submission::Model>, DbErr> {
        submission::Model::find_for_student(self, student_id, &Stage::ALL).await
    }
}

#[async_trait]
impl ReviewStore for DatabaseConnection {
    async fn insert_review(&self, new: NewReview) -> Result<review::Model, DbErr> {
        review::Model::create(
            self,
            new.submission_id,
            new.stage,
            new.reviewer_id,
            new.score,
            &new.feedback,
            new.result,
        )
        .await
    }

    async fn reviews_for_student(&self, student_id: i64) -> Result<Vec<review::Model>, DbErr> {
        review::Entity::find()
            .inner_join(submission::Entity)
            .filter(submission::Column::StudentId.eq(student_id))
            .order_by_desc(review::Column::ReviewedAt)
            .order_by_desc(review::Column::Id)
            .all(self)
            .await
    }
}

#[async_trait]
impl TopicStore for DatabaseConnection {
    async fn find_topic(&self, id: i64) -> Result<Option<topic::Model>, DbErr> {
        topic::Entity::find_by_id(id).one(self).await
    }

    async fn selection_for_student(
        &self,
        student_id: i64,
    ) -> Result<Option<topic_selection::Model>, DbErr> {
        topic_selection::Model::find_for_student(self, student_id).await
    }

    async fn select_topic(&self, student_id: i64, topic_id: i64) -> Result<SelectOutcome, DbErr> {
        if topic_selection::Model::find_for_student(self, student_id)
            .await?
            .is_some()
        {
            return Ok(SelectOutcome::AlreadySelected);
        }

        let txn = self.begin().await?;

        // Write first so SQLite takes the write lock before any read in the txn.
        if !topic::Model::try_claim_seat(&txn, topic_id).await? {
            txn.rollback().await?;
            return match topic::Entity::find_by_id(topic_id).one(self).await? {
                None => Ok(SelectOutcome::TopicMissing),
                Some(_) => Ok(SelectOutcome::Full),
            };
        }

        let inserted = topic_selection::ActiveModel {
            student_id: Set(student_id),
            topic_id: Set(topic_id),
            selected_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        match inserted {
            Ok(selection) => {
                txn.commit().await?;
                Ok(SelectOutcome::Selected(selection))
            }
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                txn.rollback().await?;
                Ok(SelectOutcome::AlreadySelected)
            }
            Err(err) => Err(err),
        }
    }

    async fn deselect_topic(&self, student_id: i64, topic_id: i64) -> Result<bool, DbErr> {
        let txn = self.begin().await?;

        let deleted = topic_selection::Entity::delete_many()
            .filter(topic_selection::Column::StudentId.eq(student_id))
            .filter(topic_selection::Column::TopicId.eq(topic_id))
            .exec(&txn)
            .await?;

        if deleted.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        topic::Model::release_seat(&txn, topic_id).await?;
        txn.commit().await?;
        Ok(true)
    }
}

// --- in-memory ---

#[derive(Debug, Default)]
struct MemoryData {
    topics: Vec<topic::Model>,
    selections: Vec<topic_selection::Model>,
    submissions: Vec<submission::Model>,
    reviews: Vec<review::Model>,
    next_id: i64,
}

impl MemoryData {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Vector-backed store with the same observable rules as the database
/// implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryData>, DbErr> {
        self.data
            .lock()
            .map_err(|_| DbErr::Custom("memory store lock poisoned".into()))
    }

    /// Seeds a topic; `id` is assigned by the store.
    pub fn add_topic(&self, mut model: topic::Model) -> Result<topic::Model, DbErr> {
        let mut data = self.lock()?;
        model.id = data.next_id();
        data.topics.push(model.clone());
        Ok(model)
    }

    pub fn topic(&self, id: i64) -> Result<Option<topic::Model>, DbErr> {
        Ok(self.lock()?.topics.iter().find(|t| t.id == id).cloned())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert_submission(&self, new: NewSubmission) -> Result<submission::Model, DbErr> {
        let mut data = self.lock()?;
        let model = submission::Model {
            id: data.next_id(),
            student_id: new.student_id,
            title: new.title,
            stage: new.stage,
            file_reference: new.file_reference,
            original_filename: new.original_filename,
            submitted_at: Utc::now(),
        };
        data.submissions.push(model.clone());
        Ok(model)
    }

    async fn find_submission(&self, id: i64) -> Result<Option<submission::Model>, DbErr> {
        Ok(self.lock()?.submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn submissions_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<submission::Model>, DbErr> {
        let mut out: Vec<_> = self
            .lock()?
            .submissions
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| (b.submitted_at, b.id).cmp(&(a.submitted_at, a.id)));
        Ok(out)
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn insert_review(&self, new: NewReview) -> Result<review::Model, DbErr> {
        let mut data = self.lock()?;
        if !data.submissions.iter().any(|s| s.id == new.submission_id) {
            return Err(DbErr::RecordNotFound(format!(
                "submission {}",
                new.submission_id
            )));
        }
        let model = review::Model {
            id: data.next_id(),
            submission_id: new.submission_id,
            stage: new.stage,
            reviewer_id: new.reviewer_id,
            score: new.score,
            feedback: new.feedback,
            result: new.result,
            reviewed_at: Utc::now(),
        };
        data.reviews.push(model.clone());
        Ok(model)
    }

    async fn reviews_for_student(&self, student_id: i64) -> Result<Vec<review::Model>, DbErr> {
        let data = self.lock()?;
        let mut out: Vec<_> = data
            .reviews
            .iter()
            .filter(|r| {
                data.submissions
                    .iter()
                    .any(|s| s.id == r.submission_id && s.student_id == student_id)
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| (b.reviewed_at, b.id).cmp(&(a.reviewed_at, a.id)));
        Ok(out)
    }
}

#[async_trait]
impl TopicStore for MemoryStore {
    async fn find_topic(&self, id: i64) -> Result<Option<topic::Model>, DbErr> {
        self.topic(id)
    }

    async fn selection_for_student(
        &self,
        student_id: i64,
    ) -> Result<Option<topic_selection::Model>, DbErr> {
        Ok(self
            .lock()?
            .selections
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned())
    }

    async fn select_topic(&self, student_id: i64, topic_id: i64) -> Result<SelectOutcome, DbErr> {
        let mut data = self.lock()?;
        if data.selections.iter().any(|s| s.student_id == student_id) {
            return Ok(SelectOutcome::AlreadySelected);
        }
        let Some(topic) = data.topics.iter_mut().find(|t| t.id == topic_id) else {
            return Ok(SelectOutcome::TopicMissing);
        };
        if topic.selected_count >= topic.max_students {
            return Ok(SelectOutcome::Full);
        }
        topic.selected_count += 1;

        let selection = topic_selection::Model {
            id: data.next_id(),
            student_id,
            topic_id,
            selected_at: Utc::now(),
        };
        data.selections.push(selection.clone());
        Ok(SelectOutcome::Selected(selection))
    }

    async fn deselect_topic(&self, student_id: i64, topic_id: i64) -> Result<bool, DbErr> {
        let mut data = self.lock()?;
        let before = data.selections.len();
        data.selections
            .retain(|s| !(s.student_id == student_id && s.topic_id == topic_id));
        if data.selections.len() == before {
            return Ok(false);
        }
        if let Some(topic) = data.topics.iter_mut().find(|t| t.id == topic_id) {
            topic.selected_count = (topic.selected_count - 1).max(0);
        }
        Ok(true)
    }
}
