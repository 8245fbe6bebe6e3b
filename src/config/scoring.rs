//! Scoring configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::matching::{MatchWeights, RankingOptions, DEFAULT_PARALLEL_THRESHOLD};

/// Defaults applied to every matching request
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Sub-score weights; individual components may be overridden
    #[serde(default)]
    pub weights: MatchWeights,

    /// Number of matches returned when a request sets no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Matches with a total score below this are dropped
    #[serde(default)]
    pub min_score: f64,

    /// Pools larger than this are scored in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl ScoringConfig {
    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            parallel_threshold: self.parallel_threshold,
        }
    }

    /// Applies per-request overrides and validates the result with the same
    /// rules as the loaded configuration.
    pub fn with_overrides(
        &self,
        weights: Option<MatchWeights>,
        limit: Option<usize>,
        min_score: Option<f64>,
    ) -> Result<ScoringConfig, ValidationError> {
        let effective = ScoringConfig {
            weights: weights.unwrap_or(self.weights),
            default_limit: limit.unwrap_or(self.default_limit),
            min_score: min_score.unwrap_or(self.min_score),
            parallel_threshold: self.parallel_threshold,
        };
        effective.validate()?;
        Ok(effective)
    }

    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.weights.validate()?;
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(ValidationError::InvalidMinScore(self.min_score));
        }
        if self.default_limit == 0 {
            return Err(ValidationError::InvalidLimit);
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            default_limit: default_limit(),
            min_score: 0.0,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::MatchingError;

    #[test]
    fn scoring_config_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.weights, MatchWeights::default());
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.min_score, 0.0);
        assert_eq!(config.parallel_threshold, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn scoring_config_rejects_min_score_outside_unit_range() {
        let config = ScoringConfig {
            min_score: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMinScore(v)) if v == 1.5
        ));

        let config = ScoringConfig {
            min_score: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn scoring_config_rejects_zero_limit() {
        let config = ScoringConfig {
            default_limit: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidLimit)));
    }

    #[test]
    fn scoring_config_rejects_bad_weights() {
        let config = ScoringConfig {
            weights: MatchWeights {
                similarity: 0.0,
                chemistry: 0.0,
                activity: 0.0,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWeights(MatchingError::ZeroWeights))
        ));
    }

    #[test]
    fn scoring_config_overrides_are_validated() {
        let config = ScoringConfig::default();

        let effective = config.with_overrides(None, Some(3), Some(0.5)).unwrap();
        assert_eq!(effective.default_limit, 3);
        assert_eq!(effective.min_score, 0.5);
        assert_eq!(effective.weights, config.weights);

        assert!(matches!(
            config.with_overrides(None, Some(0), None),
            Err(ValidationError::InvalidLimit)
        ));
        assert!(matches!(
            config.with_overrides(None, None, Some(f64::NAN)),
            Err(ValidationError::InvalidMinScore(_))
        ));
    }

    #[test]
    fn scoring_config_passes_threshold_to_ranking() {
        let config = ScoringConfig {
            parallel_threshold: 3,
            ..Default::default()
        };
        assert_eq!(config.ranking_options().parallel_threshold, 3);
    }
}
