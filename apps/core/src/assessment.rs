//! DASS-21 Scoring.
//!
//! Depression Anxiety Stress Scales, short form. 21 items answered 0-3;
//! each subscale sums 7 items and doubles the sum to match the 42-item
//! scale, then maps the score onto a severity band.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::error::AppError;

pub const DASS21_ITEM_COUNT: usize = 21;
pub const MAX_ITEM_RESPONSE: u8 = 3;

// 1-based questionnaire item numbers
const DEPRESSION_ITEMS: [usize; 7] = [3, 5, 10, 13, 16, 17, 21];
const ANXIETY_ITEMS: [usize; 7] = [2, 4, 7, 9, 15, 19, 20];
const STRESS_ITEMS: [usize; 7] = [1, 6, 8, 11, 12, 14, 18];

/// Severity band of a subscale score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Mild,
    Moderate,
    Severe,
    ExtremelySevere,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Normal => "normal",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::ExtremelySevere => "extremely severe",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subscale {
    Depression,
    Anxiety,
    Stress,
}

impl Subscale {
    fn items(&self) -> &'static [usize; 7] {
        match self {
            Subscale::Depression => &DEPRESSION_ITEMS,
            Subscale::Anxiety => &ANXIETY_ITEMS,
            Subscale::Stress => &STRESS_ITEMS,
        }
    }

    /// Highest score of the Normal, Mild, Moderate and Severe bands
    fn band_limits(&self) -> [u8; 4] {
        match self {
            Subscale::Depression => [9, 13, 20, 27],
            Subscale::Anxiety => [7, 9, 14, 19],
            Subscale::Stress => [14, 18, 25, 33],
        }
    }

    pub fn severity(&self, score: u8) -> Severity {
        let [normal, mild, moderate, severe] = self.band_limits();
        match score {
            s if s <= normal => Severity::Normal,
            s if s <= mild => Severity::Mild,
            s if s <= moderate => Severity::Moderate,
            s if s <= severe => Severity::Severe,
            _ => Severity::ExtremelySevere,
        }
    }
}

/// A completed questionnaire, answers in item order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Dass21Responses {
    #[validate(length(equal = 21))]
    pub answers: Vec<u8>,
}

impl Dass21Responses {
    pub fn new(answers: Vec<u8>) -> Self {
        Self { answers }
    }

    /// Check length and per-item range
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;

        if let Some((index, value)) = self
            .answers
            .iter()
            .enumerate()
            .find(|(_, v)| **v > MAX_ITEM_RESPONSE)
        {
            return Err(AppError::Validation(format!(
                "Item {} has response {}, expected 0-{}",
                index + 1,
                value,
                MAX_ITEM_RESPONSE
            )));
        }

        Ok(())
    }

    fn subscale_score(&self, subscale: Subscale) -> SubscaleScore {
        let raw: u8 = subscale
            .items()
            .iter()
            .map(|item| self.answers[item - 1])
            .sum();
        let score = raw * 2;
        SubscaleScore {
            score,
            severity: subscale.severity(score),
        }
    }

    /// Score the questionnaire
    pub fn score(&self) -> Result<Dass21Result, AppError> {
        self.check()?;

        let depression = self.subscale_score(Subscale::Depression);
        let anxiety = self.subscale_score(Subscale::Anxiety);
        let stress = self.subscale_score(Subscale::Stress);

        let total = u16::from(depression.score) + u16::from(anxiety.score) + u16::from(stress.score);
        let needs_support = [depression.severity, anxiety.severity, stress.severity]
            .iter()
            .any(|s| *s >= Severity::Severe);

        Ok(Dass21Result {
            depression,
            anxiety,
            stress,
            total,
            needs_support,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscaleScore {
    /// Doubled subscale sum, 0-42
    pub score: u8,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dass21Result {
    pub depression: SubscaleScore,
    pub anxiety: SubscaleScore,
    pub stress: SubscaleScore,
    /// Sum of the three subscale scores
    pub total: u16,
    /// Any subscale severe or worse
    pub needs_support: bool,
}

impl Dass21Result {
    pub fn subscale(&self, subscale: Subscale) -> &SubscaleScore {
        match subscale {
            Subscale::Depression => &self.depression,
            Subscale::Anxiety => &self.anxiety,
            Subscale::Stress => &self.stress,
        }
    }
}
