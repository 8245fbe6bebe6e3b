//! Matching handlers

mod find_matches;

pub use find_matches::{FindMatchesHandler, FindMatchesQuery, MatchReport};
