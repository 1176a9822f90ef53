use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::warn;

use crate::analysis::{JournalEntry, Message, PatternResult};
use crate::assessment::{Dass21Responses, Dass21Result};
use crate::database;
use crate::error::AppError;

/// Defines the data source the assessment advisor reads from.
///
/// This trait abstracts where user history lives, allowing the SQLite store
/// and test doubles to be used interchangeably.
#[async_trait]
pub trait WellnessStore: Send + Sync {
    /// Chat messages of one conversation thread, oldest first.
    async fn chat_history(&self, user_id: &str, conversation_id: &str)
        -> Result<Vec<Message>, AppError>;

    /// All journal entries of a user, oldest first.
    async fn journal_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>, AppError>;

    /// Completion time of the user's most recent formal assessment.
    async fn last_assessment_at(&self, user_id: &str) -> Result<Option<DateTime<Utc>>, AppError>;

    /// Stores a completed, scored assessment.
    async fn record_assessment(
        &self,
        user_id: &str,
        responses: &Dass21Responses,
        result: &Dass21Result,
        completed_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Stores a pattern analysis result.
    async fn save_pattern_snapshot(
        &self,
        user_id: &str,
        result: &PatternResult,
    ) -> Result<(), AppError>;
}

/// `WellnessStore` backed by the SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl WellnessStore for SqliteStore {
    async fn chat_history(
        &self,
        user_id: &str,
        conversation_id: &str,
    ) -> Result<Vec<Message>, AppError> {
        let rows = database::get_conversation_messages(&self.pool, user_id, conversation_id).await?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn journal_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>, AppError> {
        let rows = database::get_journal_entries(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(JournalEntry::from).collect())
    }

    async fn last_assessment_at(&self, user_id: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        let Some(record) = database::latest_assessment(&self.pool, user_id).await? else {
            return Ok(None);
        };

        let completed_at = record.completed_at_utc();
        if completed_at.is_none() {
            warn!(
                assessment_id = %record.id,
                completed_at = %record.completed_at,
                "Stored assessment has an unparseable completion time"
            );
        }
        Ok(completed_at)
    }

    async fn record_assessment(
        &self,
        user_id: &str,
        responses: &Dass21Responses,
        result: &Dass21Result,
        completed_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        database::record_assessment(&self.pool, user_id, &responses.answers, result, completed_at)
            .await?;
        Ok(())
    }

    async fn save_pattern_snapshot(
        &self,
        user_id: &str,
        result: &PatternResult,
    ) -> Result<(), AppError> {
        database::save_pattern_snapshot(&self.pool, user_id, result).await?;
        Ok(())
    }
}
