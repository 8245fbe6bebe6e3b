//! Relationship Classifier - deterministic chemistry from type codes.
//!
//! Both classifiers are pure functions over immutable tables and are safe to
//! call concurrently.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PrimaryTypeCode, Quadra, SecondaryType};

/// Score returned whenever either side of a comparison is unknown.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Secondary score for two types in the same quadra.
pub const SAME_QUADRA_SCORE: f64 = 1.0;

/// Secondary score for two known types in different quadras.
pub const CROSS_QUADRA_SCORE: f64 = 0.4;

/// Relationship tier between two primary codes, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationTier {
    /// All four axes differ.
    Complementary,
    /// Axis 1 same, axes 2-4 differ.
    Energizing,
    /// Axis 1 differs, axes 2-4 same.
    Mirrored,
    /// Axes 1 and 4 same, exactly one of axes 2/3 differs.
    Kindred,
    /// Axis 2 or 3 same while axis 4 differs.
    Asymmetric,
    /// All four axes same; full understanding, shared blind spots.
    Identical,
    /// Axes 1 and 4 same, axes 2 and 3 differ.
    Friction,
    /// Axes 1-3 differ, axis 4 same.
    Conflict,
    /// No rule matched.
    Neutral,
    /// Either code is missing or malformed.
    Unknown,
}

impl RelationTier {
    /// The nine classified tiers (excludes `Unknown`).
    pub const CLASSIFIED: [RelationTier; 9] = [
        RelationTier::Complementary,
        RelationTier::Energizing,
        RelationTier::Mirrored,
        RelationTier::Kindred,
        RelationTier::Asymmetric,
        RelationTier::Identical,
        RelationTier::Friction,
        RelationTier::Conflict,
        RelationTier::Neutral,
    ];

    pub fn score(&self) -> f64 {
        match self {
            RelationTier::Complementary => 1.0,
            RelationTier::Energizing => 0.9,
            RelationTier::Mirrored => 0.8,
            RelationTier::Kindred => 0.75,
            RelationTier::Asymmetric => 0.65,
            RelationTier::Identical => 0.6,
            RelationTier::Friction => 0.3,
            RelationTier::Conflict => 0.1,
            RelationTier::Neutral | RelationTier::Unknown => NEUTRAL_SCORE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelationTier::Complementary => "Complementary",
            RelationTier::Energizing => "Energizing",
            RelationTier::Mirrored => "Mirrored",
            RelationTier::Kindred => "Kindred",
            RelationTier::Asymmetric => "Asymmetric",
            RelationTier::Identical => "Identical",
            RelationTier::Friction => "Friction",
            RelationTier::Conflict => "Conflict",
            RelationTier::Neutral => "Neutral",
            RelationTier::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RelationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of classifying two primary codes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimaryRelationship {
    pub tier: RelationTier,
    pub score: f64,
}

impl From<RelationTier> for PrimaryRelationship {
    fn from(tier: RelationTier) -> Self {
        Self {
            tier,
            score: tier.score(),
        }
    }
}

/// Type-code relationship functions.
pub struct RelationshipClassifier;

impl RelationshipClassifier {
    /// Classifies two primary codes.
    ///
    /// Rules are evaluated in tier order and the first match wins; the
    /// predicates overlap, so the order is part of the contract.
    pub fn classify_primary(
        a: Option<&PrimaryTypeCode>,
        b: Option<&PrimaryTypeCode>,
    ) -> PrimaryRelationship {
        let (Some(a), Some(b)) = (a, b) else {
            return RelationTier::Unknown.into();
        };

        let [s1, s2, s3, s4] = a.axis_matches(b);

        let tier = if !s1 && !s2 && !s3 && !s4 {
            RelationTier::Complementary
        } else if s1 && !s2 && !s3 && !s4 {
            RelationTier::Energizing
        } else if !s1 && s2 && s3 && s4 {
            RelationTier::Mirrored
        } else if s1 && s4 && (s2 != s3) {
            RelationTier::Kindred
        } else if (s2 || s3) && !s4 {
            RelationTier::Asymmetric
        } else if s1 && s2 && s3 && s4 {
            RelationTier::Identical
        } else if s1 && s4 && !s2 && !s3 {
            RelationTier::Friction
        } else if !s1 && !s2 && !s3 && s4 {
            RelationTier::Conflict
        } else {
            RelationTier::Neutral
        };

        tier.into()
    }

    /// Parses and classifies two raw primary codes.
    pub fn classify_primary_codes(a: &str, b: &str) -> PrimaryRelationship {
        let a = PrimaryTypeCode::parse(a);
        let b = PrimaryTypeCode::parse(b);
        Self::classify_primary(a.as_ref(), b.as_ref())
    }

    /// Scores two secondary types by quadra membership.
    ///
    /// Same quadra 1.0, different quadras 0.4, either unknown 0.5.
    pub fn classify_secondary(a: Option<SecondaryType>, b: Option<SecondaryType>) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) if a.quadra() == b.quadra() => SAME_QUADRA_SCORE,
            (Some(_), Some(_)) => CROSS_QUADRA_SCORE,
            _ => NEUTRAL_SCORE,
        }
    }

    /// Parses and scores two raw secondary codes.
    pub fn classify_secondary_codes(a: &str, b: &str) -> f64 {
        Self::classify_secondary(SecondaryType::parse(a), SecondaryType::parse(b))
    }

    /// The quadra both types share, if any.
    pub fn shared_quadra(a: Option<SecondaryType>, b: Option<SecondaryType>) -> Option<Quadra> {
        match (a, b) {
            (Some(a), Some(b)) if a.quadra() == b.quadra() => Some(a.quadra()),
            _ => None,
        }
    }
}
