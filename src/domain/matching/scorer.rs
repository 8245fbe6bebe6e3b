//! Hybrid Scorer - similarity, chemistry and activity parity combined into
//! one 0-1 match score per (target, candidate) pair.
//!
//! # Sub-scores
//!
//! - Similarity: cosine of the two z-score vectors, rescaled to `0..=1`
//! - Chemistry: confidence-weighted blend of primary tier and quadra scores
//! - Activity: parity of activity volume, `1 / (log2(max/min) + 1)`
//!
//! Every division checks its denominator; no sub-score can be NaN.

use serde::{Deserialize, Serialize};

use super::{
    MatchingError, PopulationStats, PrimaryRelationship, Quadra, RelationTier,
    RelationshipClassifier, UserVector, ZScores, NEUTRAL_SCORE,
};

/// Minimum activity count on both sides for the parity score to apply.
pub const ACTIVITY_THRESHOLD: u32 = 10;

/// Magnitudes and weight sums below this are treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Weights of the three sub-scores in the final score.
///
/// Callers are responsible for making them sum to ~1.0; the engine only
/// rejects negative, non-finite or all-zero weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub similarity: f64,
    pub chemistry: f64,
    pub activity: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            similarity: 0.5,
            chemistry: 0.4,
            activity: 0.1,
        }
    }
}

impl MatchWeights {
    /// Creates validated weights.
    pub fn new(similarity: f64, chemistry: f64, activity: f64) -> Result<Self, MatchingError> {
        let weights = Self {
            similarity,
            chemistry,
            activity,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.similarity + self.chemistry + self.activity
    }

    /// Checks each weight is finite and non-negative, and not all are zero.
    pub fn validate(&self) -> Result<(), MatchingError> {
        for (component, value) in [
            ("similarity", self.similarity),
            ("chemistry", self.chemistry),
            ("activity", self.activity),
        ] {
            if !value.is_finite() {
                return Err(MatchingError::NonFiniteWeight { component });
            }
            if value < 0.0 {
                return Err(MatchingError::NegativeWeight { component, value });
            }
        }
        if self.sum() <= DEGENERATE_EPSILON {
            return Err(MatchingError::ZeroWeights);
        }
        Ok(())
    }
}

/// Components of the chemistry sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chemistry {
    pub primary: PrimaryRelationship,
    pub secondary_score: f64,
    /// Set when both secondary types fall in the same quadra.
    pub shared_quadra: Option<Quadra>,
    pub score: f64,
}

/// Explainable score of one (target, candidate) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub total_score: f64,
    pub similarity_score: f64,
    pub chemistry_score: f64,
    pub activity_score: f64,
    pub primary_tier: RelationTier,
    pub primary_tier_score: f64,
    pub secondary_group_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_quadra: Option<Quadra>,
}

/// Scores candidates against a target under fixed population statistics.
///
/// Holds only shared references and copies, so one scorer can be used from
/// many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct HybridScorer<'a> {
    stats: &'a PopulationStats,
    weights: MatchWeights,
}

impl<'a> HybridScorer<'a> {
    /// Creates a scorer, validating the weights.
    pub fn new(stats: &'a PopulationStats, weights: MatchWeights) -> Result<Self, MatchingError> {
        weights.validate()?;
        Ok(Self { stats, weights })
    }

    pub fn weights(&self) -> MatchWeights {
        self.weights
    }

    /// Z-scores of a user under this scorer's population.
    pub fn z_scores(&self, user: &UserVector) -> ZScores {
        self.stats.standardize(&user.traits)
    }

    /// Scores one candidate against the target.
    pub fn score(&self, target: &UserVector, candidate: &UserVector) -> MatchBreakdown {
        let target_z = self.z_scores(target);
        self.score_with_target_z(target, &target_z, candidate)
    }

    /// Like [`score`](Self::score) with the target's z-scores precomputed.
    pub fn score_with_target_z(
        &self,
        target: &UserVector,
        target_z: &ZScores,
        candidate: &UserVector,
    ) -> MatchBreakdown {
        let candidate_z = self.z_scores(candidate);

        let similarity = Self::similarity(target_z, &candidate_z);
        let chemistry = Self::chemistry(target, candidate);
        let activity = Self::activity(target.activity_count, candidate.activity_count);

        let total = similarity * self.weights.similarity
            + chemistry.score * self.weights.chemistry
            + activity * self.weights.activity;

        MatchBreakdown {
            total_score: total,
            similarity_score: similarity,
            chemistry_score: chemistry.score,
            activity_score: activity,
            primary_tier: chemistry.primary.tier,
            primary_tier_score: chemistry.primary.score,
            secondary_group_score: chemistry.secondary_score,
            shared_quadra: chemistry.shared_quadra,
        }
    }

    /// Cosine similarity rescaled from `-1..=1` to `0..=1`.
    ///
    /// # Edge Cases
    /// - Identical vectors (including two zero vectors): 1.0
    /// - Either vector of zero magnitude otherwise: 0.0
    pub fn similarity(a: &ZScores, b: &ZScores) -> f64 {
        if a == b {
            return 1.0;
        }

        let (norm_a, norm_b) = (a.magnitude(), b.magnitude());
        if norm_a < DEGENERATE_EPSILON || norm_b < DEGENERATE_EPSILON {
            return 0.0;
        }
        let norm = norm_a * norm_b;

        let cosine = (a.dot(b) / norm).clamp(-1.0, 1.0);
        (cosine + 1.0) / 2.0
    }

    /// Confidence-weighted blend of the primary and secondary relationship
    /// scores. Each is weighted by the geometric mean of both users'
    /// confidences; negligible total confidence falls back to 50/50.
    pub fn chemistry(a: &UserVector, b: &UserVector) -> Chemistry {
        let primary =
            RelationshipClassifier::classify_primary(a.primary_type.as_ref(), b.primary_type.as_ref());
        let secondary_score =
            RelationshipClassifier::classify_secondary(a.secondary_type, b.secondary_type);
        let shared_quadra = RelationshipClassifier::shared_quadra(a.secondary_type, b.secondary_type);

        let primary_weight = (a.primary_confidence * b.primary_confidence).sqrt();
        let secondary_weight = (a.secondary_confidence * b.secondary_confidence).sqrt();
        let total_weight = primary_weight + secondary_weight;

        let score = if total_weight < DEGENERATE_EPSILON {
            (primary.score + secondary_score) / 2.0
        } else {
            (primary.score * primary_weight + secondary_score * secondary_weight) / total_weight
        };

        Chemistry {
            primary,
            secondary_score,
            shared_quadra,
            score,
        }
    }

    /// Parity of activity volume.
    ///
    /// # Edge Cases
    /// - Either count below [`ACTIVITY_THRESHOLD`]: 0.5
    /// - Equal counts: 1.0
    pub fn activity(a: u32, b: u32) -> f64 {
        if a < ACTIVITY_THRESHOLD || b < ACTIVITY_THRESHOLD {
            return NEUTRAL_SCORE;
        }

        let high = f64::from(a.max(b));
        let low = f64::from(a.min(b).max(ACTIVITY_THRESHOLD));
        let ratio = high / low;
        (1.0 / (ratio.log2() + 1.0)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::PopulationNormalizer;
    use proptest::prelude::*;

    fn user(id: &str, traits: [f64; 5]) -> UserVector {
        UserVector::builder(id, &traits).build().unwrap()
    }

    fn z(values: [f64; 5]) -> ZScores {
        ZScores::clamped(values)
    }

    #[test]
    fn weights_default_sum_to_one() {
        let w = MatchWeights::default();
        assert!((w.sum() - 1.0).abs() < 1e-12);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn weights_reject_negative() {
        assert_eq!(
            MatchWeights::new(0.5, -0.1, 0.6),
            Err(MatchingError::NegativeWeight {
                component: "chemistry",
                value: -0.1
            })
        );
    }

    #[test]
    fn weights_reject_all_zero() {
        assert_eq!(MatchWeights::new(0.0, 0.0, 0.0), Err(MatchingError::ZeroWeights));
    }

    #[test]
    fn weights_reject_non_finite() {
        assert_eq!(
            MatchWeights::new(f64::NAN, 0.5, 0.5),
            Err(MatchingError::NonFiniteWeight {
                component: "similarity"
            })
        );
    }

    #[test]
    fn weights_allow_single_component() {
        assert!(MatchWeights::new(1.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn similarity_identical_vectors_is_one() {
        let a = z([1.0, -0.5, 0.3, 2.0, -1.0]);
        assert_eq!(HybridScorer::similarity(&a, &a), 1.0);
        let zero = z([0.0; 5]);
        assert_eq!(HybridScorer::similarity(&zero, &zero), 1.0);
    }

    #[test]
    fn similarity_zero_vector_against_other_is_zero() {
        let zero = z([0.0; 5]);
        let other = z([1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(HybridScorer::similarity(&zero, &other), 0.0);
        assert_eq!(HybridScorer::similarity(&other, &zero), 0.0);
    }

    #[test]
    fn similarity_ignores_scale_of_small_vectors() {
        let a = z([1e-5, 0.0, 0.0, 0.0, 0.0]);
        let b = z([2e-5, 0.0, 0.0, 0.0, 0.0]);
        assert!((HybridScorer::similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn similarity_opposite_vectors_is_zero() {
        let a = z([1.0, 2.0, -1.0, 0.5, 0.0]);
        let b = z([-1.0, -2.0, 1.0, -0.5, 0.0]);
        assert!(HybridScorer::similarity(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn similarity_orthogonal_vectors_is_half() {
        let a = z([1.0, 0.0, 0.0, 0.0, 0.0]);
        let b = z([0.0, 1.0, 0.0, 0.0, 0.0]);
        assert!((HybridScorer::similarity(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn activity_equal_counts_is_one() {
        assert_eq!(HybridScorer::activity(500, 500), 1.0);
        assert_eq!(HybridScorer::activity(10, 10), 1.0);
    }

    #[test]
    fn activity_below_threshold_is_neutral() {
        assert_eq!(HybridScorer::activity(500, 4), 0.5);
        assert_eq!(HybridScorer::activity(0, 0), 0.5);
        assert_eq!(HybridScorer::activity(9, 500), 0.5);
    }

    #[test]
    fn activity_decays_with_ratio() {
        // ratio 2 -> 1 / (1 + 1)
        assert!((HybridScorer::activity(100, 200) - 0.5).abs() < 1e-12);
        // ratio 4 -> 1 / (2 + 1)
        assert!((HybridScorer::activity(400, 100) - 1.0 / 3.0).abs() < 1e-12);
        assert!(HybridScorer::activity(10, 1_000_000) < 0.1);
    }

    #[test]
    fn chemistry_weights_by_geometric_mean_confidence() {
        let a = UserVector::builder("a", &[50.0; 5])
            .primary_type("ENFP", 1.0)
            .secondary_type("ILE", 0.25)
            .build()
            .unwrap();
        let b = UserVector::builder("b", &[50.0; 5])
            .primary_type("ISTJ", 1.0)
            .secondary_type("SLE", 1.0)
            .build()
            .unwrap();

        let chem = HybridScorer::chemistry(&a, &b);
        assert_eq!(chem.primary.tier, RelationTier::Complementary);
        assert_eq!(chem.secondary_score, 0.4);
        assert_eq!(chem.shared_quadra, None);
        // weights 1.0 and 0.5
        let expected = (1.0 * 1.0 + 0.4 * 0.5) / 1.5;
        assert!((chem.score - expected).abs() < 1e-12);
    }

    #[test]
    fn chemistry_zero_confidence_falls_back_to_even_split() {
        let a = UserVector::builder("a", &[50.0; 5])
            .primary_type("ENFP", 0.0)
            .secondary_type("ILE", 0.0)
            .build()
            .unwrap();
        let b = UserVector::builder("b", &[50.0; 5])
            .primary_type("ENFP", 0.9)
            .secondary_type("LII", 0.9)
            .build()
            .unwrap();

        let chem = HybridScorer::chemistry(&a, &b);
        assert_eq!(chem.primary.tier, RelationTier::Identical);
        assert_eq!(chem.shared_quadra, Some(Quadra::Alpha));
        assert!((chem.score - (0.6 + 1.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn chemistry_unknown_codes_is_neutral() {
        let a = user("a", [50.0; 5]);
        let b = user("b", [60.0; 5]);
        let chem = HybridScorer::chemistry(&a, &b);
        assert_eq!(chem.primary.tier, RelationTier::Unknown);
        assert_eq!(chem.score, 0.5);
    }

    #[test]
    fn scorer_rejects_invalid_weights() {
        let users = vec![user("a", [50.0; 5])];
        let stats = PopulationNormalizer::fit(&users).unwrap();
        let weights = MatchWeights {
            similarity: -1.0,
            chemistry: 1.0,
            activity: 1.0,
        };
        assert!(HybridScorer::new(&stats, weights).is_err());
    }

    #[test]
    fn scorer_combines_weighted_sub_scores() {
        let target = user("t", [50.0; 5]);
        let candidate = user("c", [50.0; 5]);
        let stats = PopulationNormalizer::fit(&[target.clone(), candidate.clone()]).unwrap();
        let scorer = HybridScorer::new(&stats, MatchWeights::default()).unwrap();

        let breakdown = scorer.score(&target, &candidate);
        assert_eq!(breakdown.similarity_score, 1.0);
        assert_eq!(breakdown.chemistry_score, 0.5);
        assert_eq!(breakdown.activity_score, 0.5);
        assert!((breakdown.total_score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn scorer_respects_custom_weights() {
        let target = user("t", [50.0; 5]);
        let candidate = user("c", [50.0; 5]);
        let stats = PopulationNormalizer::fit(&[target.clone(), candidate.clone()]).unwrap();
        let scorer = HybridScorer::new(&stats, MatchWeights::new(0.0, 1.0, 0.0).unwrap()).unwrap();

        let breakdown = scorer.score(&target, &candidate);
        assert!((breakdown.total_score - 0.5).abs() < 1e-12);
    }

    fn arb_z() -> impl Strategy<Value = [f64; 5]> {
        prop::array::uniform5(-3.0f64..=3.0)
    }

    proptest! {
        /// Property: similarity stays within 0..=1 and never NaN
        #[test]
        fn prop_similarity_bounded(a in arb_z(), b in arb_z()) {
            let s = HybridScorer::similarity(&z(a), &z(b));
            prop_assert!(s.is_finite());
            prop_assert!((0.0..=1.0).contains(&s));
        }

        /// Property: activity parity is bounded and symmetric
        #[test]
        fn prop_activity_bounded_and_symmetric(a in 0u32..1_000_000, b in 0u32..1_000_000) {
            let s = HybridScorer::activity(a, b);
            prop_assert!((0.0..=1.0).contains(&s));
            prop_assert_eq!(s, HybridScorer::activity(b, a));
        }
    }
}
