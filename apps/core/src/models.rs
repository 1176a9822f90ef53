use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::analysis::{parse_timestamp, JournalEntry, Message, PatternResult, Sender};
use crate::assessment::Dass21Result;

/// A registered user of the companion.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    /// The unique identifier for the user (UUID).
    pub id: String,
    /// Name shown in the companion's greetings.
    pub display_name: String,
    /// RFC 3339 time the user was created.
    pub created_at: String,
}

/// A single stored chat message within a conversation thread.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ChatMessageRow {
    pub id: i64,
    /// The ID of the user who owns the conversation.
    pub user_id: String,
    /// The ID of the conversation thread this message belongs to.
    pub conversation_id: String,
    /// The sender label (e.g., "user", "assistant").
    pub sender: String,
    /// The text content of the message, if any.
    pub content: Option<String>,
    /// RFC 3339 time the message was sent.
    pub sent_at: String,
}

impl From<ChatMessageRow> for Message {
    fn from(row: ChatMessageRow) -> Self {
        Message {
            sender: Sender::from_label(&row.sender),
            content: row.content,
            timestamp: Some(row.sent_at),
        }
    }
}

/// A stored journal entry.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct JournalEntryRow {
    /// The unique identifier for the entry (UUID).
    pub id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    /// RFC 3339 time the entry was written.
    pub created_at: String,
}

impl From<JournalEntryRow> for JournalEntry {
    fn from(row: JournalEntryRow) -> Self {
        JournalEntry {
            title: row.title,
            content: row.content,
            created_at: Some(row.created_at),
            timestamp: None,
        }
    }
}

/// A completed DASS-21 questionnaire.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct AssessmentRecord {
    /// The unique identifier for the record (UUID).
    pub id: String,
    pub user_id: String,
    /// Instrument name, currently always "dass21".
    pub kind: String,
    /// Raw item answers in questionnaire order.
    pub answers: Json<Vec<u8>>,
    /// Scored subscales.
    pub result: Json<Dass21Result>,
    /// RFC 3339 completion time.
    pub completed_at: String,
}

impl AssessmentRecord {
    pub fn completed_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.completed_at)
    }
}

/// A persisted pattern analysis result.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct PatternSnapshot {
    pub id: i64,
    pub user_id: String,
    /// Copy of `result.should_suggest_assessment` for querying.
    pub should_suggest: bool,
    /// Copy of `result.confidence` for querying.
    pub confidence: i64,
    pub result: Json<PatternResult>,
    /// RFC 3339 time of the analysis.
    pub analyzed_at: String,
}
