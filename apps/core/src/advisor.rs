//! Assessment Advisor.
//!
//! Runs the stress pattern analyzer over a user's stored history and decides
//! whether the client should show the DASS-21 invitation. A suggestion is
//! suppressed while a previously completed assessment is still recent.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{PatternResult, StressPatternAnalyzer};
use crate::assessment::{Dass21Responses, Dass21Result};
use crate::config::{AdvisorConfig, AppConfig};
use crate::error::AppError;
use crate::store::WellnessStore;

/// Outcome of one evaluation, serialized for the client banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSuggestion {
    /// Whether the client should surface the invitation
    pub show_suggestion: bool,
    /// The analyzer suggested an assessment but a recent one exists
    pub suppressed_by_recent_assessment: bool,
    pub last_assessment_at: Option<DateTime<Utc>>,
    pub pattern: PatternResult,
}

pub struct AssessmentAdvisor {
    analyzer: StressPatternAnalyzer,
    cooldown_days: u32,
    persist_snapshots: bool,
}

impl AssessmentAdvisor {
    pub fn new(analyzer: StressPatternAnalyzer, config: &AdvisorConfig) -> Self {
        Self {
            analyzer,
            cooldown_days: config.assessment_cooldown_days,
            persist_snapshots: config.persist_snapshots,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            StressPatternAnalyzer::from_config(&config.analysis),
            &config.advisor,
        )
    }

    pub fn analyzer(&self) -> &StressPatternAnalyzer {
        &self.analyzer
    }

    /// True when `last` is less than the cooldown period before `now`
    fn is_recent(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.cooldown_days > 0
            && now.signed_duration_since(last) < Duration::days(i64::from(self.cooldown_days))
    }

    pub async fn evaluate<S>(
        &self,
        store: &S,
        user_id: &str,
        conversation_id: &str,
    ) -> Result<AssessmentSuggestion, AppError>
    where
        S: WellnessStore + ?Sized,
    {
        self.evaluate_at(store, user_id, conversation_id, Utc::now())
            .await
    }

    /// Evaluate a user's conversation thread relative to `now`
    pub async fn evaluate_at<S>(
        &self,
        store: &S,
        user_id: &str,
        conversation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AssessmentSuggestion, AppError>
    where
        S: WellnessStore + ?Sized,
    {
        let (chat_history, journals, last_assessment_at) = tokio::try_join!(
            store.chat_history(user_id, conversation_id),
            store.journal_entries(user_id),
            store.last_assessment_at(user_id),
        )?;

        let pattern = self.analyzer.analyze_at(&chat_history, &journals, now);

        let recent = last_assessment_at.is_some_and(|last| self.is_recent(last, now));
        let suppressed_by_recent_assessment = pattern.should_suggest_assessment && recent;
        let show_suggestion = pattern.should_suggest_assessment && !recent;

        if suppressed_by_recent_assessment {
            info!(
                user_id,
                cooldown_days = self.cooldown_days,
                "Assessment suggestion suppressed by a recent assessment"
            );
        } else if show_suggestion {
            info!(user_id, confidence = pattern.confidence, "Suggesting assessment");
        }

        if self.persist_snapshots {
            store.save_pattern_snapshot(user_id, &pattern).await?;
        }

        Ok(AssessmentSuggestion {
            show_suggestion,
            suppressed_by_recent_assessment,
            last_assessment_at,
            pattern,
        })
    }

    pub async fn complete_assessment<S>(
        &self,
        store: &S,
        user_id: &str,
        answers: Vec<u8>,
    ) -> Result<Dass21Result, AppError>
    where
        S: WellnessStore + ?Sized,
    {
        self.complete_assessment_at(store, user_id, answers, Utc::now())
            .await
    }

    /// Score a DASS-21 submission and record it as completed at `completed_at`
    pub async fn complete_assessment_at<S>(
        &self,
        store: &S,
        user_id: &str,
        answers: Vec<u8>,
        completed_at: DateTime<Utc>,
    ) -> Result<Dass21Result, AppError>
    where
        S: WellnessStore + ?Sized,
    {
        let responses = Dass21Responses::new(answers);
        let result = responses.score()?;

        store
            .record_assessment(user_id, &responses, &result, completed_at)
            .await?;

        info!(
            user_id,
            depression = %result.depression.severity,
            anxiety = %result.anxiety.severity,
            stress = %result.stress.severity,
            "DASS-21 assessment recorded"
        );

        Ok(result)
    }
}
