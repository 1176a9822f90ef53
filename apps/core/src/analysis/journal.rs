//! Journal stress signal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::records::JournalEntry;
use super::scorer::MessageScorer;
use super::{round2, window_start};

/// Entries scoring above this count as stressed
pub const STRESSED_JOURNAL_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalAnalysis {
    /// Mean entry stress score, 2 decimals
    pub average_stress_score: f64,
    pub stressed_journal_count: usize,
    /// Entries inside the window
    pub total_journals: usize,
    pub skipped_records: usize,
    pub reason: String,
}

/// Analyze journal entries written in the last `days_to_analyze` days
pub fn analyze_journals(
    scorer: &MessageScorer,
    entries: &[JournalEntry],
    days_to_analyze: u32,
    now: DateTime<Utc>,
) -> JournalAnalysis {
    if entries.is_empty() {
        return JournalAnalysis {
            average_stress_score: 0.0,
            stressed_journal_count: 0,
            total_journals: 0,
            skipped_records: 0,
            reason: "No journal entries available".to_string(),
        };
    }

    let cutoff = window_start(now, days_to_analyze);
    let mut skipped_records = 0;
    let mut total_stress = 0.0;
    let mut stressed_journal_count = 0;
    let mut total_journals = 0;

    for entry in entries {
        let Some(written_at) = entry.written_at() else {
            skipped_records += 1;
            warn!("Skipping journal entry with unparseable timestamp");
            continue;
        };
        if written_at < cutoff {
            continue;
        }

        let analysis = scorer.score(&entry.text());
        total_stress += analysis.stress_score;
        if analysis.stress_score > STRESSED_JOURNAL_THRESHOLD {
            stressed_journal_count += 1;
        }
        total_journals += 1;
    }

    let average_stress_score = if total_journals > 0 {
        round2(total_stress / total_journals as f64)
    } else {
        0.0
    };

    let reason = if total_journals == 0 {
        format!("No journal entries in the last {} days", days_to_analyze)
    } else {
        format!(
            "{} of {} recent journal entries show elevated stress",
            stressed_journal_count, total_journals
        )
    };

    JournalAnalysis {
        average_stress_score,
        stressed_journal_count,
        total_journals,
        skipped_records,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 21, 0, 0).unwrap()
    }

    #[test]
    fn test_no_entries() {
        let result = analyze_journals(&MessageScorer::new(), &[], 3, now());
        assert_eq!(result.total_journals, 0);
        assert_eq!(result.average_stress_score, 0.0);
        assert_eq!(result.reason, "No journal entries available");
    }

    #[test]
    fn test_title_is_scored_with_content() {
        let entries = vec![JournalEntry::new(
            Some("Overwhelmed".to_string()),
            "work left me exhausted and worried",
            now(),
        )];
        let result = analyze_journals(&MessageScorer::new(), &entries, 3, now());

        assert_eq!(result.total_journals, 1);
        assert_eq!(result.stressed_journal_count, 1);
        assert_eq!(result.average_stress_score, 3.0);
    }

    #[test]
    fn test_average_and_window() {
        let entries = vec![
            JournalEntry::new(None, "a quiet evening reading at home", now()),
            JournalEntry::new(None, "so tired and lonely this week", now() - Duration::days(1)),
            JournalEntry::new(None, "stressed anxious overwhelmed", now() - Duration::days(10)),
        ];
        let result = analyze_journals(&MessageScorer::new(), &entries, 3, now());

        assert_eq!(result.total_journals, 2);
        assert_eq!(result.stressed_journal_count, 0);
        assert_eq!(result.average_stress_score, 1.0);
        assert!(result.reason.starts_with("0 of 2"));
    }

    #[test]
    fn test_rounding() {
        let entries = vec![
            JournalEntry::new(None, "tired today, nothing else", now()),
            JournalEntry::new(None, "went for a walk outside", now()),
            JournalEntry::new(None, "read a book by the window", now()),
        ];
        let result = analyze_journals(&MessageScorer::new(), &entries, 3, now());

        assert_eq!(result.average_stress_score, 0.33);
    }

    #[test]
    fn test_bad_timestamp_counted() {
        let mut entry = JournalEntry::new(None, "stressed", now());
        entry.created_at = Some("??".to_string());
        let result = analyze_journals(&MessageScorer::new(), &[entry], 3, now());

        assert_eq!(result.skipped_records, 1);
        assert_eq!(result.total_journals, 0);
        assert!(result.reason.contains("last 3 days"));
    }
}
