//! Application handlers.
//!
//! Query handlers that orchestrate domain operations.

pub mod matching;

pub use matching::{FindMatchesHandler, FindMatchesQuery, MatchReport};
