//! CandidateSource port for loading the visible candidate pool

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::matching::UserVector;

/// Errors that can occur while reading profiles from a source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileSourceError {
    /// Source location does not exist
    #[error("Profile source not found: {0}")]
    NotFound(String),
    /// Underlying read failed
    #[error("IO error: {0}")]
    Io(String),
    /// Content is not a recognized profile document
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<ProfileSourceError> for DomainError {
    fn from(err: ProfileSourceError) -> Self {
        DomainError::new(ErrorCode::ProfileSourceError, err.to_string())
    }
}

/// Candidates read from a source, with the count of records dropped as
/// malformed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    pub candidates: Vec<UserVector>,
    pub skipped: usize,
}

impl CandidatePool {
    pub fn new(candidates: Vec<UserVector>) -> Self {
        Self {
            candidates,
            skipped: 0,
        }
    }
}

/// Read access to the pool of candidates a target is matched against
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Load every candidate currently visible to a scoring run.
    ///
    /// Individual malformed records are skipped and counted; only a failure
    /// of the source as a whole is an error.
    async fn load_candidates(&self) -> Result<CandidatePool, ProfileSourceError>;
}
