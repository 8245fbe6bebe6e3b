//! FindMatches - Query handler ranking a candidate pool against one target.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ScoringConfig;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::matching::{score_matches_with, MatchWeights, RankedMatch, UserVector};
use crate::ports::CandidateSource;

/// Query to rank every visible candidate against `target`.
///
/// Unset options fall back to the handler's scoring configuration.
#[derive(Debug, Clone)]
pub struct FindMatchesQuery {
    pub target: UserVector,
    pub weights: Option<MatchWeights>,
    pub limit: Option<usize>,
    pub min_score: Option<f64>,
}

impl FindMatchesQuery {
    pub fn new(target: UserVector) -> Self {
        Self {
            target,
            weights: None,
            limit: None,
            min_score: None,
        }
    }

    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }
}

/// Result of a matching query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub target_id: UserId,
    pub weights: MatchWeights,
    /// Target plus every candidate that was scored.
    pub population_size: usize,
    /// Candidate records dropped because they carried the target's id.
    pub excluded_self: usize,
    /// Records the source could not read.
    pub skipped: usize,
    pub matches: Vec<RankedMatch>,
}

/// Handler for finding matches.
pub struct FindMatchesHandler {
    source: Arc<dyn CandidateSource>,
    config: ScoringConfig,
}

impl FindMatchesHandler {
    pub fn new(source: Arc<dyn CandidateSource>, config: ScoringConfig) -> Self {
        Self { source, config }
    }

    pub async fn handle(&self, query: FindMatchesQuery) -> Result<MatchReport, DomainError> {
        let settings = self
            .config
            .with_overrides(query.weights, query.limit, query.min_score)?;
        let weights = settings.weights;
        let target = query.target;

        let pool = self.source.load_candidates().await?;
        let loaded = pool.candidates.len();
        let candidates: Vec<UserVector> = pool
            .candidates
            .into_iter()
            .filter(|candidate| candidate.user_id != target.user_id)
            .collect();
        let excluded_self = loaded - candidates.len();

        debug!(
            target_id = %target.user_id,
            candidates = candidates.len(),
            excluded_self,
            skipped = pool.skipped,
            "Scoring candidate pool"
        );

        let ranked = score_matches_with(
            &target,
            &candidates,
            weights,
            settings.ranking_options(),
        )?;
        let scored = ranked.len();

        let mut matches: Vec<RankedMatch> = ranked
            .into_iter()
            .filter(|m| m.breakdown.total_score >= settings.min_score)
            .collect();
        let below_min_score = scored - matches.len();
        matches.truncate(settings.default_limit);

        info!(
            target_id = %target.user_id,
            scored,
            below_min_score,
            returned = matches.len(),
            "Match ranking complete"
        );

        Ok(MatchReport {
            target_id: target.user_id,
            weights,
            population_size: candidates.len() + 1,
            excluded_self,
            skipped: pool.skipped,
            matches,
        })
    }
}
