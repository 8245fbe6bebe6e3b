//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CandidateSource` - Loads the candidate pool from the profile store

mod candidate_source;

pub use candidate_source::{CandidatePool, CandidateSource, ProfileSourceError};
