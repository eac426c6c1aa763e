//! Error taxonomy shared across the workspace.
//!
//! [`SessionError`] is the kind every Session Service operation fails with;
//! collaborator errors (repository, LLM, weather) are converted at the
//! service boundary with the original cause preserved in the message.

use thiserror::Error;

use crate::llm::LlmError;
use crate::weather::WeatherError;

/// Errors from repository operations (trait definitions live in dermaglow-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from Session Service and Recommendation Service operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Bad or missing input: message length, absent intake form.
    #[error("validation error: {0}")]
    Validation(String),

    /// The session does not exist (or was already deleted).
    #[error("session not found")]
    NotFound,

    /// A weather or language-model call failed.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Slug collision at creation. Creation is not retried; see DESIGN.md.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence failure unrelated to a missing entity.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for SessionError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => SessionError::NotFound,
            RepositoryError::Conflict(msg) => SessionError::Conflict(msg),
            other => SessionError::Storage(other.to_string()),
        }
    }
}

impl From<LlmError> for SessionError {
    fn from(e: LlmError) -> Self {
        SessionError::Upstream(e.to_string())
    }
}

impl From<WeatherError> for SessionError {
    fn from(e: WeatherError) -> Self {
        SessionError::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_mapping() {
        assert!(matches!(
            SessionError::from(RepositoryError::NotFound),
            SessionError::NotFound
        ));
        assert!(matches!(
            SessionError::from(RepositoryError::Conflict("slug 'x7k2p1'".into())),
            SessionError::Conflict(_)
        ));
        assert!(matches!(
            SessionError::from(RepositoryError::Query("syntax error".into())),
            SessionError::Storage(_)
        ));
    }

    #[test]
    fn test_llm_error_preserves_cause() {
        let err = SessionError::from(LlmError::Provider {
            status: Some(429),
            message: "quota exhausted".to_string(),
        });
        assert!(err.to_string().contains("quota exhausted"));
    }

    #[test]
    fn test_weather_error_maps_to_upstream() {
        let err = SessionError::from(WeatherError::MissingApiKey);
        assert!(matches!(err, SessionError::Upstream(_)));
    }
}
