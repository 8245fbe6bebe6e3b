//! Matching-specific error types.
//!
//! Only conditions that make a scoring run meaningless live here. Degenerate
//! but well-formed data (zero vectors, unknown type codes, thin activity)
//! resolves to neutral scores instead.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Invalid input to a scoring run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchingError {
    #[error("Population is empty; at least the target must be supplied")]
    EmptyPopulation,

    #[error("Trait vector must have {expected} values, got {actual}")]
    InvalidTraitArity { expected: usize, actual: usize },

    #[error("Trait '{dimension}' must be within 0..=100, got {value}")]
    TraitOutOfRange { dimension: &'static str, value: f64 },

    #[error("Field '{field}' must be a finite number")]
    NonFiniteValue { field: &'static str },

    #[error("Weight '{component}' must be non-negative, got {value}")]
    NegativeWeight { component: &'static str, value: f64 },

    #[error("Weight '{component}' must be a finite number")]
    NonFiniteWeight { component: &'static str },

    #[error("At least one weight must be greater than zero")]
    ZeroWeights,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MatchingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MatchingError::EmptyPopulation => ErrorCode::EmptyPopulation,
            MatchingError::InvalidTraitArity { .. }
            | MatchingError::TraitOutOfRange { .. }
            | MatchingError::NonFiniteValue { .. } => ErrorCode::InvalidTraitVector,
            MatchingError::NegativeWeight { .. }
            | MatchingError::NonFiniteWeight { .. }
            | MatchingError::ZeroWeights => ErrorCode::InvalidWeights,
            MatchingError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<MatchingError> for DomainError {
    fn from(err: MatchingError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            MatchingError::InvalidTraitArity { expected, actual } => domain
                .with_detail("expected", expected.to_string())
                .with_detail("actual", actual.to_string()),
            MatchingError::TraitOutOfRange { dimension, .. } => {
                domain.with_detail("dimension", dimension)
            }
            MatchingError::NonFiniteValue { field } => domain.with_detail("field", field),
            MatchingError::NegativeWeight { component, .. }
            | MatchingError::NonFiniteWeight { component } => {
                domain.with_detail("component", component)
            }
            _ => domain,
        }
    }
}
