//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `profiles` - Candidate sources (JSON files, in-memory)

pub mod profiles;

pub use profiles::{InMemoryCandidateSource, JsonProfileStore};
