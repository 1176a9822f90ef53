use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use validator::Validate;

use crate::analysis::{MatchMode, DEFAULT_DAYS_TO_ANALYZE};
use crate::error::AppError;

const ENV_DATABASE_URL: &str = "WELLNESS_DATABASE_URL";
const ENV_DAYS_TO_ANALYZE: &str = "WELLNESS_DAYS_TO_ANALYZE";
const ENV_MATCH_MODE: &str = "WELLNESS_MATCH_MODE";
const ENV_COOLDOWN_DAYS: &str = "WELLNESS_ASSESSMENT_COOLDOWN_DAYS";
const ENV_PERSIST_SNAPSHOTS: &str = "WELLNESS_PERSIST_SNAPSHOTS";
const ENV_LOG_LEVEL: &str = "WELLNESS_LOG_LEVEL";
const ENV_LOG_FORMAT: &str = "WELLNESS_LOG_FORMAT";

/// Default suppression period after a completed assessment
pub const DEFAULT_ASSESSMENT_COOLDOWN_DAYS: u32 = 7;

/// Settings for the stress pattern analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisConfig {
    /// Trailing window, in days, of chat and journal data to analyze.
    #[validate(range(min = 1, max = 90))]
    pub days_to_analyze: u32,
    /// How keywords are matched against text.
    pub match_mode: MatchMode,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            days_to_analyze: DEFAULT_DAYS_TO_ANALYZE,
            match_mode: MatchMode::Substring,
        }
    }
}

/// Settings for the assessment advisor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdvisorConfig {
    /// Days after a completed assessment during which suggestions are suppressed.
    #[validate(range(max = 365))]
    pub assessment_cooldown_days: u32,
    /// Whether each evaluation's pattern result is stored.
    pub persist_snapshots: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            assessment_cooldown_days: DEFAULT_ASSESSMENT_COOLDOWN_DAYS,
            persist_snapshots: false,
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Settings for the tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info").
    #[validate(length(min = 1))]
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// SQLx connection URL of the wellness database.
    #[validate(length(min = 1))]
    pub database_url: String,
    #[validate(nested)]
    pub analysis: AnalysisConfig,
    #[validate(nested)]
    pub advisor: AdvisorConfig,
    #[validate(nested)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://data/wellness.sqlite".to_string(),
            analysis: AnalysisConfig::default(),
            advisor: AdvisorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads `WELLNESS_*` variables over the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_DATABASE_URL) {
            config.database_url = url;
        }
        if let Some(days) = parse_var::<_, u32>(&lookup, ENV_DAYS_TO_ANALYZE)? {
            config.analysis.days_to_analyze = days;
        }
        if let Some(mode) = parse_var::<_, MatchMode>(&lookup, ENV_MATCH_MODE)? {
            config.analysis.match_mode = mode;
        }
        if let Some(days) = parse_var::<_, u32>(&lookup, ENV_COOLDOWN_DAYS)? {
            config.advisor.assessment_cooldown_days = days;
        }
        if let Some(raw) = lookup(ENV_PERSIST_SNAPSHOTS) {
            config.advisor.persist_snapshots = parse_bool(ENV_PERSIST_SNAPSHOTS, &raw)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }
        if let Some(format) = parse_var::<_, LogFormat>(&lookup, ENV_LOG_FORMAT)? {
            config.logging.format = format;
        }

        config
            .validate()
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))?;

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", name, raw, e))),
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{} has invalid value '{}': expected a boolean",
            name, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.analysis.days_to_analyze, 3);
        assert_eq!(config.analysis.match_mode, MatchMode::Substring);
        assert_eq!(config.advisor.assessment_cooldown_days, 7);
        assert!(!config.advisor.persist_snapshots);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DATABASE_URL, "sqlite::memory:"),
            (ENV_DAYS_TO_ANALYZE, "5"),
            (ENV_MATCH_MODE, "whole_word"),
            (ENV_COOLDOWN_DAYS, "14"),
            (ENV_PERSIST_SNAPSHOTS, "yes"),
            (ENV_LOG_FORMAT, "json"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.analysis.days_to_analyze, 5);
        assert_eq!(config.analysis.match_mode, MatchMode::WholeWord);
        assert_eq!(config.advisor.assessment_cooldown_days, 14);
        assert!(config.advisor.persist_snapshots);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_malformed_value_names_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_DAYS_TO_ANALYZE, "three")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(ref msg) if msg.contains(ENV_DAYS_TO_ANALYZE)));

        let err = AppConfig::from_lookup(lookup_from(&[(ENV_PERSIST_SNAPSHOTS, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_DAYS_TO_ANALYZE, "0")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = AppConfig::from_lookup(lookup_from(&[(ENV_DAYS_TO_ANALYZE, "365")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            vec![
                (ENV_DAYS_TO_ANALYZE, Some("4")),
                (ENV_LOG_LEVEL, Some("debug")),
                (ENV_MATCH_MODE, None),
            ],
            || {
                let config = AppConfig::from_env().unwrap();
                assert_eq!(config.analysis.days_to_analyze, 4);
                assert_eq!(config.logging.level, "debug");
                assert_eq!(config.analysis.match_mode, MatchMode::Substring);
            },
        );
    }
}
