//! Continuous trait measurements: raw scores and their standardized form.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::MatchingError;

/// Number of trait dimensions in every vector.
pub const TRAIT_COUNT: usize = 5;

/// Lower bound of a raw trait score.
pub const TRAIT_MIN: f64 = 0.0;

/// Upper bound of a raw trait score.
pub const TRAIT_MAX: f64 = 100.0;

/// Bound applied to every z-score component.
pub const Z_SCORE_LIMIT: f64 = 3.0;

/// The five trait positions, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitDimension {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl TraitDimension {
    /// All dimensions in vector order.
    pub const ALL: [TraitDimension; TRAIT_COUNT] = [
        TraitDimension::Openness,
        TraitDimension::Conscientiousness,
        TraitDimension::Extraversion,
        TraitDimension::Agreeableness,
        TraitDimension::Neuroticism,
    ];

    /// Position of this dimension inside a trait vector.
    pub fn index(&self) -> usize {
        match self {
            TraitDimension::Openness => 0,
            TraitDimension::Conscientiousness => 1,
            TraitDimension::Extraversion => 2,
            TraitDimension::Agreeableness => 3,
            TraitDimension::Neuroticism => 4,
        }
    }

    /// Returns the display label for this dimension.
    pub fn label(&self) -> &'static str {
        match self {
            TraitDimension::Openness => "Openness",
            TraitDimension::Conscientiousness => "Conscientiousness",
            TraitDimension::Extraversion => "Extraversion",
            TraitDimension::Agreeableness => "Agreeableness",
            TraitDimension::Neuroticism => "Neuroticism",
        }
    }

    fn field_name(&self) -> &'static str {
        match self {
            TraitDimension::Openness => "openness",
            TraitDimension::Conscientiousness => "conscientiousness",
            TraitDimension::Extraversion => "extraversion",
            TraitDimension::Agreeableness => "agreeableness",
            TraitDimension::Neuroticism => "neuroticism",
        }
    }
}

impl fmt::Display for TraitDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw trait scores, each finite and within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TraitScores([f64; TRAIT_COUNT]);

impl TraitScores {
    /// Validates arity and range of an upstream measurement.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, MatchingError> {
        if values.len() != TRAIT_COUNT {
            return Err(MatchingError::InvalidTraitArity {
                expected: TRAIT_COUNT,
                actual: values.len(),
            });
        }

        let mut scores = [0.0; TRAIT_COUNT];
        for (dimension, (&value, slot)) in TraitDimension::ALL
            .iter()
            .zip(values.iter().zip(scores.iter_mut()))
        {
            if !value.is_finite() {
                return Err(MatchingError::NonFiniteValue {
                    field: dimension.field_name(),
                });
            }
            if !(TRAIT_MIN..=TRAIT_MAX).contains(&value) {
                return Err(MatchingError::TraitOutOfRange {
                    dimension: dimension.field_name(),
                    value,
                });
            }
            *slot = value;
        }

        Ok(Self(scores))
    }

    /// Returns the score for one dimension.
    pub fn get(&self, dimension: TraitDimension) -> f64 {
        self.0[dimension.index()]
    }

    pub fn as_array(&self) -> &[f64; TRAIT_COUNT] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TraitScores {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<f64>::deserialize(deserializer)?;
        TraitScores::try_from_slice(&values).map_err(serde::de::Error::custom)
    }
}

/// Population-relative standard scores, each clamped to `-3..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZScores([f64; TRAIT_COUNT]);

impl ZScores {
    /// Clamps each component to the z-score bound. Non-finite components
    /// collapse to zero so nothing downstream sees NaN.
    pub fn clamped(values: [f64; TRAIT_COUNT]) -> Self {
        Self(values.map(|z| {
            if z.is_finite() {
                z.clamp(-Z_SCORE_LIMIT, Z_SCORE_LIMIT)
            } else {
                0.0
            }
        }))
    }

    pub fn get(&self, dimension: TraitDimension) -> f64 {
        self.0[dimension.index()]
    }

    pub fn as_array(&self) -> &[f64; TRAIT_COUNT] {
        &self.0
    }

    /// Euclidean norm of the vector.
    pub fn magnitude(&self) -> f64 {
        self.0.iter().map(|z| z * z).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &ZScores) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }
}
