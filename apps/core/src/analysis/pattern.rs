//! Stress Pattern Analyzer - orchestrator for the analysis module.
//!
//! Merges the chat and journal signals into a single advisory verdict on
//! whether to invite the user to take a formal assessment, together with a
//! heuristic confidence. Pure computation: no I/O, inputs are only read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::chat::{analyze_chat, ChatAnalysis, DailyAnalysis};
use super::journal::{analyze_journals, JournalAnalysis};
use super::records::{JournalEntry, Message};
use super::round2;
use super::scorer::{MatchMode, MessageScorer};
use crate::config::AnalysisConfig;

/// Trailing window used when the caller does not pick one
pub const DEFAULT_DAYS_TO_ANALYZE: u32 = 3;

const CHAT_WEIGHT: f64 = 0.7;
const JOURNAL_WEIGHT: f64 = 0.3;

/// Combined score that can trigger a suggestion on its own
const COMBINED_SUGGESTION_THRESHOLD: f64 = 3.0;
/// Chat days required for the combined trigger
const COMBINED_MIN_DAYS: usize = 2;

const MAX_CONFIDENCE: u32 = 100;

const RECOMMEND_ASSESSMENT: &str = "Your recent conversations suggest you have been under \
     sustained stress. Taking the DASS-21 assessment can help you understand how you are feeling.";
const RECOMMEND_CONTINUE: &str =
    "Keep checking in. No formal assessment is suggested right now.";

/// Verdict of a full pattern analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternResult {
    pub should_suggest_assessment: bool,
    /// Chat average stress score, 2 decimals
    pub average_stress_score: f64,
    /// Weighted chat/journal score, 2 decimals
    pub combined_stress_score: f64,
    pub consecutive_stressed_days: usize,
    pub daily_analysis: Vec<DailyAnalysis>,
    pub total_days_analyzed: usize,
    /// Heuristic 0-100
    pub confidence: u8,
    /// The chat-only trigger
    pub chat_suggested_assessment: bool,
    pub skipped_records: usize,
    pub journal_analysis: JournalAnalysis,
    pub recommendation: String,
    pub reason: String,
    pub days_to_analyze: u32,
    pub analyzed_at: DateTime<Utc>,
}

impl PatternResult {
    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Suggest: {}, Confidence: {}%, Days: {}, Streak: {}, Chat avg: {:.2}, Combined: {:.2}",
            if self.should_suggest_assessment { "yes" } else { "no" },
            self.confidence,
            self.total_days_analyzed,
            self.consecutive_stressed_days,
            self.average_stress_score,
            self.combined_stress_score
        )
    }
}

/// Weighted blend of chat and journal averages
pub fn combined_stress_score(chat_average: f64, journal_average: f64) -> f64 {
    round2(chat_average * CHAT_WEIGHT + journal_average * JOURNAL_WEIGHT)
}

/// Heuristic confidence in `[0, 100]` from how much data backs the verdict
pub fn confidence_score(
    total_days_analyzed: usize,
    consecutive_stressed_days: usize,
    total_journals: usize,
    chat_average: f64,
) -> u8 {
    let mut confidence: u32 = 0;

    confidence += match total_days_analyzed {
        d if d >= 3 => 30,
        2 => 20,
        _ => 10,
    };

    confidence += match consecutive_stressed_days {
        d if d >= 3 => 40,
        2 => 25,
        _ => 0,
    };

    confidence += match total_journals {
        j if j >= 2 => 20,
        1 => 10,
        _ => 0,
    };

    if chat_average >= 4.0 {
        confidence += 10;
    }

    confidence.min(MAX_CONFIDENCE) as u8
}

/// Main analyzer combining chat and journal stress signals
#[derive(Debug, Clone, Copy)]
pub struct StressPatternAnalyzer {
    scorer: MessageScorer,
    days_to_analyze: u32,
}

impl Default for StressPatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StressPatternAnalyzer {
    /// Create an analyzer with the default window and substring matching
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAYS_TO_ANALYZE, MatchMode::Substring)
    }

    pub fn with_config(days_to_analyze: u32, match_mode: MatchMode) -> Self {
        Self {
            scorer: MessageScorer::with_match_mode(match_mode),
            days_to_analyze,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::with_config(config.days_to_analyze, config.match_mode)
    }

    pub fn days_to_analyze(&self) -> u32 {
        self.days_to_analyze
    }

    pub fn scorer(&self) -> &MessageScorer {
        &self.scorer
    }

    /// Analyze with the configured window, relative to the current time
    pub fn analyze(&self, chat_history: &[Message], journals: &[JournalEntry]) -> PatternResult {
        self.analyze_at(chat_history, journals, Utc::now())
    }

    /// Analyze with the configured window, relative to `now`
    pub fn analyze_at(
        &self,
        chat_history: &[Message],
        journals: &[JournalEntry],
        now: DateTime<Utc>,
    ) -> PatternResult {
        self.analyze_window_at(chat_history, journals, self.days_to_analyze, now)
    }

    /// Chat-only analysis relative to `now`
    pub fn analyze_chat_at(&self, chat_history: &[Message], now: DateTime<Utc>) -> ChatAnalysis {
        analyze_chat(&self.scorer, chat_history, self.days_to_analyze, now)
    }

    /// Journal-only analysis relative to `now`
    pub fn analyze_journals_at(
        &self,
        journals: &[JournalEntry],
        now: DateTime<Utc>,
    ) -> JournalAnalysis {
        analyze_journals(&self.scorer, journals, self.days_to_analyze, now)
    }

    /// Analyze with a caller-chosen window, relative to `now`
    pub fn analyze_window_at(
        &self,
        chat_history: &[Message],
        journals: &[JournalEntry],
        days_to_analyze: u32,
        now: DateTime<Utc>,
    ) -> PatternResult {
        let chat = analyze_chat(&self.scorer, chat_history, days_to_analyze, now);
        let journal = analyze_journals(&self.scorer, journals, days_to_analyze, now);

        let combined =
            combined_stress_score(chat.average_stress_score, journal.average_stress_score);

        let should_suggest_assessment = chat.should_suggest_dass21
            || (combined >= COMBINED_SUGGESTION_THRESHOLD
                && chat.total_days_analyzed >= COMBINED_MIN_DAYS);

        let confidence = confidence_score(
            chat.total_days_analyzed,
            chat.consecutive_stressed_days,
            journal.total_journals,
            chat.average_stress_score,
        );

        let recommendation = if should_suggest_assessment {
            RECOMMEND_ASSESSMENT
        } else {
            RECOMMEND_CONTINUE
        };

        let result = PatternResult {
            should_suggest_assessment,
            average_stress_score: chat.average_stress_score,
            combined_stress_score: combined,
            consecutive_stressed_days: chat.consecutive_stressed_days,
            daily_analysis: chat.daily_analysis,
            total_days_analyzed: chat.total_days_analyzed,
            confidence,
            chat_suggested_assessment: chat.should_suggest_dass21,
            skipped_records: chat.skipped_records,
            journal_analysis: journal,
            recommendation: recommendation.to_string(),
            reason: chat.reason,
            days_to_analyze,
            analyzed_at: now,
        };

        info!("Stress pattern analysis: {}", result.summary());

        result
    }
}
