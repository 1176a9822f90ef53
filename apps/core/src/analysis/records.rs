//! Input records for stress analysis.
//!
//! Chat messages and journal entries arrive from a document store whose
//! shape is not guaranteed: content may be missing or non-textual and
//! timestamps come in several encodings. Deserialization is lenient and
//! never fails on those fields; bad values surface later as "no text" or
//! "no timestamp".

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Naive datetime layouts accepted in addition to RFC 3339 (read as UTC)
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Value")]
pub enum Sender {
    User,
    Assistant,
    #[default]
    Other,
}

impl Sender {
    /// Map a stored sender label to a sender. Labels are case-sensitive.
    pub fn from_label(label: &str) -> Self {
        match label {
            "user" => Sender::User,
            "assistant" | "ai" | "bot" => Sender::Assistant,
            _ => Sender::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
            Sender::Other => "other",
        }
    }
}

impl From<Value> for Sender {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Sender::from_label(&s),
            _ => Sender::Other,
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub sender: Sender,
    /// Message text; `None` when missing or not a string
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    /// Raw timestamp as stored
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<String>,
}

impl Message {
    pub fn new(sender: Sender, content: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            sender,
            content: Some(content.into()),
            timestamp: Some(sent_at.to_rfc3339()),
        }
    }

    /// Shorthand for a message written by the user
    pub fn from_user(content: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self::new(Sender::User, content, sent_at)
    }

    /// Message text, empty when absent
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Parsed send time, `None` when missing or unparseable
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }
}

/// A journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "lenient_timestamp")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<String>,
}

impl JournalEntry {
    pub fn new(
        title: Option<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title,
            content: Some(content.into()),
            created_at: Some(created_at.to_rfc3339()),
            timestamp: None,
        }
    }

    /// Title and content joined with a space
    pub fn text(&self) -> String {
        match (self.title.as_deref(), self.content.as_deref()) {
            (Some(title), Some(content)) => format!("{} {}", title, content),
            (Some(title), None) => title.to_string(),
            (None, Some(content)) => content.to_string(),
            (None, None) => String::new(),
        }
    }

    /// `createdAt` when present and non-empty, otherwise `timestamp`
    pub fn written_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.timestamp.as_deref())
            .and_then(parse_timestamp)
    }
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD[ T]HH:MM:SS[.f]` (UTC), bare
/// `YYYY-MM-DD` (midnight UTC) and integer epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
