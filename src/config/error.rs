//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::matching::MatchingError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(#[from] MatchingError),

    #[error("min_score must be within 0.0..=1.0, got {0}")]
    InvalidMinScore(f64),

    #[error("limit must be greater than zero")]
    InvalidLimit,

    #[error("Log filter must not be empty")]
    EmptyLogFilter,
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::InvalidWeights(inner) => return inner.clone().into(),
            ValidationError::InvalidMinScore(_) => "min_score",
            ValidationError::InvalidLimit => "limit",
            ValidationError::EmptyLogFilter => "logging.level",
        };
        DomainError::new(ErrorCode::ValidationFailed, err.to_string()).with_detail("field", field)
    }
}
