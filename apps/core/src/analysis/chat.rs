//! Daily aggregation of chat messages.
//!
//! Groups the user's messages inside a trailing window by UTC calendar day,
//! scores each day and measures the trailing run of stressed days.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use super::records::{Message, Sender};
use super::{round2, window_start};
use super::scorer::{MessageAnalysis, MessageScorer};

/// A day is stressed when its average stress score exceeds this
pub const STRESSED_DAY_THRESHOLD: f64 = 2.0;

/// Trailing stressed days needed for a chat-only suggestion
pub const MIN_CONSECUTIVE_STRESSED_DAYS: usize = 2;

/// Window average needed for a chat-only suggestion
pub const MIN_AVERAGE_FOR_SUGGESTION: f64 = 2.5;

/// Stress statistics for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnalysis {
    pub date: NaiveDate,
    pub message_count: usize,
    pub avg_stress_score: f64,
    pub avg_positive_score: f64,
    pub is_stressed: bool,
    pub indicators: BTreeSet<String>,
}

impl DailyAnalysis {
    fn from_scores(date: NaiveDate, scores: &[MessageAnalysis]) -> Self {
        let count = scores.len() as f64;
        let avg_stress_score = scores.iter().map(|s| s.stress_score).sum::<f64>() / count;
        let avg_positive_score = scores.iter().map(|s| s.positive_score).sum::<f64>() / count;

        let indicators = scores
            .iter()
            .flat_map(|s| s.indicators.iter().cloned())
            .collect();

        Self {
            date,
            message_count: scores.len(),
            avg_stress_score,
            avg_positive_score,
            is_stressed: avg_stress_score > STRESSED_DAY_THRESHOLD
                && avg_stress_score > avg_positive_score,
            indicators,
        }
    }
}

/// Chat-only stress verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnalysis {
    #[serde(rename = "shouldSuggestDASS21")]
    pub should_suggest_dass21: bool,
    /// Mean of the daily averages, 2 decimals
    pub average_stress_score: f64,
    pub consecutive_stressed_days: usize,
    /// Days with at least one message, oldest first
    pub daily_analysis: Vec<DailyAnalysis>,
    pub total_days_analyzed: usize,
    /// User messages dropped for a missing or unparseable timestamp
    pub skipped_records: usize,
    pub reason: String,
}

impl ChatAnalysis {
    fn empty(reason: String, skipped_records: usize) -> Self {
        Self {
            should_suggest_dass21: false,
            average_stress_score: 0.0,
            consecutive_stressed_days: 0,
            daily_analysis: Vec::new(),
            total_days_analyzed: 0,
            skipped_records,
            reason,
        }
    }
}

/// Analyze the user's chat messages from the last `days_to_analyze` days
pub fn analyze_chat(
    scorer: &MessageScorer,
    messages: &[Message],
    days_to_analyze: u32,
    now: DateTime<Utc>,
) -> ChatAnalysis {
    if messages.is_empty() {
        return ChatAnalysis::empty("No chat history available".to_string(), 0);
    }

    let cutoff = window_start(now, days_to_analyze);
    let mut skipped_records = 0;
    let mut by_day: BTreeMap<NaiveDate, Vec<MessageAnalysis>> = BTreeMap::new();

    for message in messages.iter().filter(|m| m.sender == Sender::User) {
        let Some(sent_at) = message.sent_at() else {
            skipped_records += 1;
            warn!(
                timestamp = message.timestamp.as_deref().unwrap_or("<missing>"),
                "Skipping chat message with unparseable timestamp"
            );
            continue;
        };

        if sent_at < cutoff {
            continue;
        }

        by_day
            .entry(sent_at.date_naive())
            .or_default()
            .push(scorer.score(message.text()));
    }

    if by_day.is_empty() {
        return ChatAnalysis::empty(
            format!("No chat messages in the last {} days", days_to_analyze),
            skipped_records,
        );
    }

    // BTreeMap iteration is already oldest-first
    let daily_analysis: Vec<DailyAnalysis> = by_day
        .iter()
        .map(|(date, scores)| DailyAnalysis::from_scores(*date, scores))
        .collect();

    for day in &daily_analysis {
        debug!(
            date = %day.date,
            messages = day.message_count,
            avg_stress = day.avg_stress_score,
            stressed = day.is_stressed,
            "Daily chat stress"
        );
    }

    // Only days present in the window are walked; a day without messages
    // does not break the streak.
    let consecutive_stressed_days = daily_analysis
        .iter()
        .rev()
        .take_while(|day| day.is_stressed)
        .count();

    let total_days_analyzed = daily_analysis.len();
    let average = daily_analysis
        .iter()
        .map(|day| day.avg_stress_score)
        .sum::<f64>()
        / total_days_analyzed as f64;

    let should_suggest_dass21 = consecutive_stressed_days >= MIN_CONSECUTIVE_STRESSED_DAYS
        && average >= MIN_AVERAGE_FOR_SUGGESTION;

    let reason = if should_suggest_dass21 {
        format!(
            "Elevated stress detected for {} consecutive days (average score {:.2})",
            consecutive_stressed_days, average
        )
    } else if consecutive_stressed_days > 0 {
        format!(
            "Stress detected on {} recent day(s), below the suggestion threshold",
            consecutive_stressed_days
        )
    } else {
        "No sustained stress pattern detected".to_string()
    };

    ChatAnalysis {
        should_suggest_dass21,
        average_stress_score: round2(average),
        consecutive_stressed_days,
        daily_analysis,
        total_days_analyzed,
        skipped_records,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    const STRESSED: &str = "I am stressed, anxious and overwhelmed";

    #[test]
    fn test_empty_history() {
        let result = analyze_chat(&MessageScorer::new(), &[], 3, now());

        assert!(!result.should_suggest_dass21);
        assert_eq!(result.total_days_analyzed, 0);
        assert_eq!(result.reason, "No chat history available");
    }

    #[test]
    fn test_only_user_messages_scored() {
        let messages = vec![
            Message::new(Sender::Assistant, STRESSED, now()),
            Message::new(Sender::Other, STRESSED, now()),
        ];
        let result = analyze_chat(&MessageScorer::new(), &messages, 3, now());

        assert_eq!(result.total_days_analyzed, 0);
        assert!(result.reason.contains("last 3 days"));
    }

    #[test]
    fn test_window_cutoff_is_inclusive() {
        let messages = vec![
            Message::from_user(STRESSED, now() - Duration::days(3)),
            Message::from_user(STRESSED, now() - Duration::days(3) - Duration::seconds(1)),
        ];
        let result = analyze_chat(&MessageScorer::new(), &messages, 3, now());

        assert_eq!(result.total_days_analyzed, 1);
        assert_eq!(result.daily_analysis[0].message_count, 1);
    }

    #[test]
    fn test_days_sorted_and_averaged() {
        let messages = vec![
            Message::from_user("feeling calm and happy today", now()),
            Message::from_user(STRESSED, now() - Duration::days(1)),
            Message::from_user("I am tired", now() - Duration::days(1)),
        ];
        let result = analyze_chat(&MessageScorer::new(), &messages, 3, now());

        assert_eq!(result.total_days_analyzed, 2);
        let yesterday = &result.daily_analysis[0];
        let today = &result.daily_analysis[1];
        assert!(yesterday.date < today.date);

        assert_eq!(yesterday.message_count, 2);
        assert_eq!(yesterday.avg_stress_score, 2.0);
        assert!(!yesterday.is_stressed);
        assert_eq!(
            yesterday.indicators.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["anxious", "overwhelmed", "stressed", "tired"]
        );

        assert_eq!(today.avg_positive_score, 2.0);
        assert_eq!(result.average_stress_score, 1.0);
    }

    #[test]
    fn test_streak_stops_at_unstressed_day() {
        let messages = vec![
            Message::from_user(STRESSED, now() - Duration::days(2)),
            Message::from_user("nothing much happened", now() - Duration::days(1)),
            Message::from_user(STRESSED, now()),
        ];
        let result = analyze_chat(&MessageScorer::new(), &messages, 3, now());

        assert_eq!(result.consecutive_stressed_days, 1);
        assert!(!result.should_suggest_dass21);
    }

    #[test]
    fn test_missing_day_does_not_break_streak() {
        let messages = vec![
            Message::from_user(STRESSED, now() - Duration::days(2)),
            Message::from_user(STRESSED, now()),
        ];
        let result = analyze_chat(&MessageScorer::new(), &messages, 3, now());

        assert_eq!(result.total_days_analyzed, 2);
        assert_eq!(result.consecutive_stressed_days, 2);
        assert!(result.should_suggest_dass21);
    }

    #[test]
    fn test_unparseable_timestamps_skipped() {
        let mut broken = Message::from_user(STRESSED, now());
        broken.timestamp = Some("last tuesday".to_string());
        let mut missing = Message::from_user(STRESSED, now());
        missing.timestamp = None;

        let messages = vec![broken, missing, Message::from_user("hello there friend", now())];
        let result = analyze_chat(&MessageScorer::new(), &messages, 3, now());

        assert_eq!(result.skipped_records, 2);
        assert_eq!(result.total_days_analyzed, 1);
        assert_eq!(result.daily_analysis[0].avg_stress_score, 0.0);
    }
}
