//! # Analysis Module
//!
//! Stress pattern analysis over a user's recent chat messages and journal
//! entries. Decides whether to invite the user to take a formal assessment.
//!
//! ## Components
//! - `lexicon`: stress and positive keyword tables (English, Hindi, Hinglish)
//! - `records`: input records and lenient timestamp parsing
//! - `scorer`: per-message stress / positivity scoring
//! - `chat`: per-day aggregation and stressed-day streak
//! - `journal`: journal stress signal
//! - `pattern`: main orchestrator and `PatternResult`
//!
//! Calendar days are UTC dates.

use chrono::{DateTime, Duration, Utc};

pub mod chat;
pub mod journal;
pub mod lexicon;
pub mod pattern;
pub mod records;
pub mod scorer;

pub use chat::{analyze_chat, ChatAnalysis, DailyAnalysis};
pub use journal::{analyze_journals, JournalAnalysis};
pub use pattern::{
    combined_stress_score, confidence_score, PatternResult, StressPatternAnalyzer,
    DEFAULT_DAYS_TO_ANALYZE,
};
pub use records::{parse_timestamp, JournalEntry, Message, Sender};
pub use scorer::{MatchMode, MessageAnalysis, MessageScorer, Sentiment};

/// Start of a trailing window of `days` days ending at `now`.
///
/// Windows reaching past the earliest representable time start there.
pub(crate) fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Round to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
