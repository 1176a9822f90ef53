use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// The stress analyzer itself is infallible; these errors come from
/// configuration, persistence and assessment input validation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents errors originating from the database, typically from `sqlx`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents data validation errors (e.g., a malformed questionnaire).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(sqlx::Error::Migrate(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            AppError::Validation("bad".to_string()).to_string(),
            "Validation error: bad"
        );
        assert_eq!(
            AppError::Config("WELLNESS_LOG_FORMAT".to_string()).to_string(),
            "Configuration error: WELLNESS_LOG_FORMAT"
        );
    }

    #[test]
    fn test_sqlx_error_is_database() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_validation_errors_convert() {
        let err: AppError = Named { name: String::new() }.validate().unwrap_err().into();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("name")));
    }
}
