//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, percentages, errors)
//! - `matching` - Population normalization, type-code chemistry and hybrid ranking

pub mod foundation;
pub mod matching;
