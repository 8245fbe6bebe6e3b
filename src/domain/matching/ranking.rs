//! Ranking and distinctive-trait reporting.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    HybridScorer, MatchBreakdown, MatchWeights, MatchingError, PopulationNormalizer, TraitDimension,
    UserVector, ZScores,
};
use crate::domain::foundation::{Percentage, UserId};

/// |z| at or above which a trait is reported as distinctive.
pub const DISTINCTIVE_Z_THRESHOLD: f64 = 0.8;

/// Maximum number of distinctive traits reported per candidate.
pub const MAX_DISTINCTIVE_TRAITS: usize = 3;

/// Default pool size above which candidates are scored in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Direction of a distinctive trait relative to the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitLevel {
    NotablyHigh,
    NotablyLow,
}

/// A trait on which a candidate stands out from the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistinctiveTrait {
    pub dimension: TraitDimension,
    pub level: TraitLevel,
    pub z_score: f64,
}

/// Coarse, human-readable reading of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchVerdict {
    Doppelganger,
    Soulmate,
    StrongMatch,
    GoodMatch,
    ActivityGap,
    DifferentTemperament,
    Ordinary,
}

impl MatchVerdict {
    /// First matching rule wins.
    pub fn from_breakdown(breakdown: &MatchBreakdown) -> Self {
        let total = breakdown.total_score;
        if total >= 0.99 {
            MatchVerdict::Doppelganger
        } else if total >= 0.90 {
            MatchVerdict::Soulmate
        } else if total >= 0.80 {
            MatchVerdict::StrongMatch
        } else if total >= 0.70 {
            MatchVerdict::GoodMatch
        } else if breakdown.activity_score < 0.4 {
            MatchVerdict::ActivityGap
        } else if breakdown.similarity_score < 0.4 {
            MatchVerdict::DifferentTemperament
        } else {
            MatchVerdict::Ordinary
        }
    }
}

/// One scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub candidate_id: UserId,
    pub display_name: String,
    #[serde(flatten)]
    pub breakdown: MatchBreakdown,
    pub match_percent: Percentage,
    pub verdict: MatchVerdict,
    pub distinctive_traits: Vec<DistinctiveTrait>,
}

/// Tuning that does not affect results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    /// Pools larger than this are scored on the rayon thread pool.
    pub parallel_threshold: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Ranking functions.
pub struct MatchRanker;

impl MatchRanker {
    /// Traits with |z| >= 0.8, strongest first, at most three.
    ///
    /// Ties in magnitude keep dimension order.
    pub fn distinctive_traits(z_scores: &ZScores) -> Vec<DistinctiveTrait> {
        let mut traits: Vec<DistinctiveTrait> = TraitDimension::ALL
            .iter()
            .filter_map(|&dimension| {
                let z = z_scores.get(dimension);
                let level = if z >= DISTINCTIVE_Z_THRESHOLD {
                    TraitLevel::NotablyHigh
                } else if z <= -DISTINCTIVE_Z_THRESHOLD {
                    TraitLevel::NotablyLow
                } else {
                    return None;
                };
                Some(DistinctiveTrait {
                    dimension,
                    level,
                    z_score: z,
                })
            })
            .collect();

        traits.sort_by(|a, b| b.z_score.abs().total_cmp(&a.z_score.abs()));
        traits.truncate(MAX_DISTINCTIVE_TRAITS);
        traits
    }

    /// Sorts descending by total score; equal scores keep input order.
    pub fn sort_descending(matches: &mut [RankedMatch]) {
        matches.sort_by(|a, b| b.breakdown.total_score.total_cmp(&a.breakdown.total_score));
    }
}

/// Scores every candidate against the target and ranks them.
///
/// The population is the target plus all candidates, normalized once.
///
/// # Errors
///
/// Only invalid weights fail a run; incomplete candidate data resolves to
/// neutral sub-scores.
pub fn score_matches(
    target: &UserVector,
    candidates: &[UserVector],
    weights: MatchWeights,
) -> Result<Vec<RankedMatch>, MatchingError> {
    score_matches_with(target, candidates, weights, RankingOptions::default())
}

/// [`score_matches`] with explicit ranking options.
pub fn score_matches_with(
    target: &UserVector,
    candidates: &[UserVector],
    weights: MatchWeights,
    options: RankingOptions,
) -> Result<Vec<RankedMatch>, MatchingError> {
    let population =
        std::iter::once(&target.traits).chain(candidates.iter().map(|c| &c.traits));
    let stats = PopulationNormalizer::fit_traits(population)?;
    let scorer = HybridScorer::new(&stats, weights)?;
    let target_z = scorer.z_scores(target);

    let rank_one = |candidate: &UserVector| {
        let breakdown = scorer.score_with_target_z(target, &target_z, candidate);
        RankedMatch {
            candidate_id: candidate.user_id.clone(),
            display_name: candidate.display_name.clone(),
            match_percent: Percentage::from_fraction(breakdown.total_score),
            verdict: MatchVerdict::from_breakdown(&breakdown),
            distinctive_traits: MatchRanker::distinctive_traits(&scorer.z_scores(candidate)),
            breakdown,
        }
    };

    // Collecting an indexed parallel iterator preserves input order.
    let mut matches: Vec<RankedMatch> = if candidates.len() > options.parallel_threshold {
        candidates.par_iter().map(rank_one).collect()
    } else {
        candidates.iter().map(rank_one).collect()
    };

    MatchRanker::sort_descending(&mut matches);
    Ok(matches)
}
