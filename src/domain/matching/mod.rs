//! Matching Module - Pure domain services for compatibility scoring.
//!
//! Stateless functions that turn a pool of trait records into ranked,
//! explainable match scores. There is no I/O here; a scoring run takes an
//! immutable snapshot and returns a value.
//!
//! # Components
//!
//! - `PopulationNormalizer` - Blended population statistics and clamped z-scores
//! - `RelationshipClassifier` - Primary-code tiers and secondary quadra scores
//! - `HybridScorer` - Similarity, chemistry and activity combined per pair
//! - `MatchRanker` / `score_matches` - Ranking and distinctive-trait reporting
//!
//! # Layering
//!
//! The normalizer and classifier are leaves; the scorer depends on both, and
//! ranking drives the scorer once per candidate.

mod errors;
mod population;
mod ranking;
mod relationship;
mod scorer;
mod traits;
mod type_codes;
mod user_vector;

pub use errors::MatchingError;
pub use population::{
    normalize_population, PopulationNormalizer, PopulationStats, FULL_TRUST_POPULATION,
    PRIOR_MEAN, PRIOR_STD, STD_EPSILON,
};
pub use ranking::{
    score_matches, score_matches_with, DistinctiveTrait, MatchRanker, MatchVerdict, RankedMatch,
    RankingOptions, TraitLevel, DEFAULT_PARALLEL_THRESHOLD, DISTINCTIVE_Z_THRESHOLD,
    MAX_DISTINCTIVE_TRAITS,
};
pub use relationship::{
    PrimaryRelationship, RelationTier, RelationshipClassifier, CROSS_QUADRA_SCORE, NEUTRAL_SCORE,
    SAME_QUADRA_SCORE,
};
pub use scorer::{
    Chemistry, HybridScorer, MatchBreakdown, MatchWeights, ACTIVITY_THRESHOLD, DEGENERATE_EPSILON,
};
pub use traits::{TraitDimension, TraitScores, ZScores, TRAIT_COUNT, TRAIT_MAX, TRAIT_MIN, Z_SCORE_LIMIT};
pub use type_codes::{PrimaryTypeCode, Quadra, SecondaryType, PRIMARY_AXES, UNKNOWN_AXIS};
pub use user_vector::{UserVector, UserVectorBuilder};
