//! Message Scoring.
//!
//! Assigns a stress score and a positivity score to a single piece of free
//! text by matching it against the stress and positive lexicons, with small
//! boosts for disengaged short replies and heavy punctuation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::lexicon::{positive_keywords, stress_keywords};

/// Upper bound of the stress score
pub const MAX_STRESS_SCORE: f64 = 10.0;

/// Replies with at most this many words count as short
const SHORT_MESSAGE_MAX_WORDS: usize = 2;
const SHORT_MESSAGE_BOOST: f64 = 0.5;

/// More than this many `!` or `?` reads as emotional intensity
const PUNCTUATION_LIMIT: usize = 2;
const PUNCTUATION_BOOST: f64 = 0.5;

/// One score must lead the other by more than this to set the sentiment
const SENTIMENT_MARGIN: f64 = 1.0;

/// Coarse affect label for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        write!(f, "{}", label)
    }
}

/// How lexicon keywords are located in text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Keyword anywhere in the text, including inside longer words
    #[default]
    Substring,
    /// Keyword bounded by Unicode word boundaries
    WholeWord,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "whole_word" | "whole-word" | "wholeword" => Ok(MatchMode::WholeWord),
            other => Err(format!("unknown match mode '{}'", other)),
        }
    }
}

/// Result of scoring one message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAnalysis {
    /// Stress score in `[0, 10]`
    pub stress_score: f64,
    pub positive_score: f64,
    /// Stress keywords found, in lexicon order
    pub indicators: Vec<String>,
    pub sentiment: Sentiment,
    pub word_count: usize,
}

fn whole_word_patterns(keywords: &[&str]) -> Vec<Regex> {
    keywords
        .iter()
        .map(|term| {
            // NOTE: escaped literals always compile
            Regex::new(&format!(r"\b{}\b", regex::escape(term)))
                .expect("Invalid regex: escaped lexicon keyword")
        })
        .collect()
}

// Parallel to the lexicon tables, compiled once
static STRESS_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| whole_word_patterns(stress_keywords()));
static POSITIVE_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| whole_word_patterns(positive_keywords()));

/// Scores free text against the stress and positive lexicons
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageScorer {
    match_mode: MatchMode,
}

impl MessageScorer {
    /// Create a scorer using substring matching
    pub fn new() -> Self {
        Self::with_match_mode(MatchMode::Substring)
    }

    pub fn with_match_mode(match_mode: MatchMode) -> Self {
        Self { match_mode }
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Lexicon entries present in already-lowercased text
    fn matches<'a>(
        &self,
        lowered: &str,
        keywords: &[&'a str],
        patterns: &[Regex],
    ) -> Vec<&'a str> {
        match self.match_mode {
            MatchMode::Substring => keywords
                .iter()
                .copied()
                .filter(|term| lowered.contains(term))
                .collect(),
            MatchMode::WholeWord => keywords
                .iter()
                .zip(patterns)
                .filter(|(_, re)| re.is_match(lowered))
                .map(|(term, _)| *term)
                .collect(),
        }
    }

    /// Score one message
    pub fn score(&self, text: &str) -> MessageAnalysis {
        if text.is_empty() {
            return MessageAnalysis::default();
        }

        let lowered = text.to_lowercase();

        let indicators = self.matches(&lowered, stress_keywords(), &STRESS_PATTERNS);
        let positive_hits = self.matches(&lowered, positive_keywords(), &POSITIVE_PATTERNS);

        let mut stress_score = indicators.len() as f64;
        let positive_score = positive_hits.len() as f64;

        let word_count = lowered.split_whitespace().count();
        if word_count <= SHORT_MESSAGE_MAX_WORDS && positive_hits.is_empty() {
            stress_score += SHORT_MESSAGE_BOOST;
        }

        let exclamations = lowered.matches('!').count();
        let questions = lowered.matches('?').count();
        if exclamations > PUNCTUATION_LIMIT || questions > PUNCTUATION_LIMIT {
            stress_score += PUNCTUATION_BOOST;
        }

        let stress_score = stress_score.min(MAX_STRESS_SCORE);

        let sentiment = if stress_score > positive_score + SENTIMENT_MARGIN {
            Sentiment::Negative
        } else if positive_score > stress_score + SENTIMENT_MARGIN {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        };

        MessageAnalysis {
            stress_score,
            positive_score,
            indicators: indicators.into_iter().map(str::to_string).collect(),
            sentiment,
            word_count,
        }
    }

    /// Score text that may be absent
    pub fn score_optional(&self, text: Option<&str>) -> MessageAnalysis {
        text.map(|t| self.score(t)).unwrap_or_default()
    }
}
