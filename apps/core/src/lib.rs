// Wellness Companion Core
// Stress pattern analysis, DASS-21 scoring and assessment suggestions

pub mod advisor;
pub mod analysis;
pub mod assessment;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;

#[cfg(test)]
mod tests;

pub use advisor::{AssessmentAdvisor, AssessmentSuggestion};
pub use analysis::{JournalEntry, Message, PatternResult, Sender, StressPatternAnalyzer};
pub use assessment::{Dass21Responses, Dass21Result};
pub use config::AppConfig;
pub use error::AppError;
pub use store::{SqliteStore, WellnessStore};
