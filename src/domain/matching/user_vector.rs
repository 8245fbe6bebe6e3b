//! UserVector - the strongly-typed per-person record a scoring run consumes.

use serde::Serialize;

use super::{MatchingError, PrimaryTypeCode, SecondaryType, TraitScores, ZScores};
use crate::domain::foundation::UserId;

/// One person being compared.
///
/// Built once per scoring request from upstream trait data. All validation
/// happens in [`UserVectorBuilder::build`]; scoring code never re-checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserVector {
    pub user_id: UserId,
    pub display_name: String,
    /// `None` when the upstream code was missing or malformed.
    pub primary_type: Option<PrimaryTypeCode>,
    pub primary_confidence: f64,
    pub traits: TraitScores,
    pub trait_confidence: f64,
    /// `None` when the upstream code was not one of the sixteen known codes.
    pub secondary_type: Option<SecondaryType>,
    pub secondary_confidence: f64,
    pub activity_count: u32,
    /// Filled in by population normalization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_scores: Option<ZScores>,
}

impl UserVector {
    /// Starts a builder for the given identifier and raw trait values.
    pub fn builder(user_id: impl Into<String>, traits: &[f64]) -> UserVectorBuilder {
        UserVectorBuilder::new(user_id, traits)
    }

    /// Returns a copy carrying the given z-scores.
    pub fn with_z_scores(mut self, z_scores: ZScores) -> Self {
        self.z_scores = Some(z_scores);
        self
    }
}

/// Builder for constructing validated [`UserVector`] instances.
#[derive(Debug, Clone)]
pub struct UserVectorBuilder {
    user_id: String,
    display_name: Option<String>,
    traits: Vec<f64>,
    trait_confidence: f64,
    primary_type: Option<String>,
    primary_confidence: f64,
    secondary_type: Option<String>,
    secondary_confidence: f64,
    activity_count: u32,
}

impl UserVectorBuilder {
    /// Creates a new builder with unknown type codes and zero confidence.
    pub fn new(user_id: impl Into<String>, traits: &[f64]) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            traits: traits.to_vec(),
            trait_confidence: 0.0,
            primary_type: None,
            primary_confidence: 0.0,
            secondary_type: None,
            secondary_confidence: 0.0,
            activity_count: 0,
        }
    }

    /// Sets the name shown in reports. Defaults to the user id.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn trait_confidence(mut self, confidence: f64) -> Self {
        self.trait_confidence = confidence;
        self
    }

    /// Sets the primary code and its confidence.
    pub fn primary_type(mut self, code: impl Into<String>, confidence: f64) -> Self {
        self.primary_type = Some(code.into());
        self.primary_confidence = confidence;
        self
    }

    /// Sets the secondary code and its confidence.
    pub fn secondary_type(mut self, code: impl Into<String>, confidence: f64) -> Self {
        self.secondary_type = Some(code.into());
        self.secondary_confidence = confidence;
        self
    }

    pub fn activity_count(mut self, count: u32) -> Self {
        self.activity_count = count;
        self
    }

    /// Validates and builds the vector.
    ///
    /// # Errors
    ///
    /// - Empty user id
    /// - Trait vector of the wrong arity, non-finite or outside `0..=100`
    /// - NaN confidence (finite confidences are clamped to `0..=1`)
    pub fn build(self) -> Result<UserVector, MatchingError> {
        let user_id = UserId::new(self.user_id)?;
        let traits = TraitScores::try_from_slice(&self.traits)?;

        Ok(UserVector {
            display_name: self
                .display_name
                .unwrap_or_else(|| user_id.as_str().to_string()),
            user_id,
            primary_type: self.primary_type.as_deref().and_then(PrimaryTypeCode::parse),
            primary_confidence: clamp_confidence(self.primary_confidence, "primary_confidence")?,
            traits,
            trait_confidence: clamp_confidence(self.trait_confidence, "trait_confidence")?,
            secondary_type: self.secondary_type.as_deref().and_then(SecondaryType::parse),
            secondary_confidence: clamp_confidence(
                self.secondary_confidence,
                "secondary_confidence",
            )?,
            activity_count: self.activity_count,
            z_scores: None,
        })
    }
}

fn clamp_confidence(value: f64, field: &'static str) -> Result<f64, MatchingError> {
    if value.is_nan() {
        return Err(MatchingError::NonFiniteValue { field });
    }
    Ok(value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_unknown_codes() {
        let user = UserVector::builder("u1", &[50.0; 5]).build().unwrap();
        assert_eq!(user.display_name, "u1");
        assert!(user.primary_type.is_none());
        assert!(user.secondary_type.is_none());
        assert_eq!(user.activity_count, 0);
        assert!(user.z_scores.is_none());
    }

    #[test]
    fn builder_parses_codes_once() {
        let user = UserVector::builder("u1", &[50.0; 5])
            .display_name("Mina")
            .primary_type("enfp", 0.8)
            .secondary_type("iee", 0.6)
            .activity_count(320)
            .build()
            .unwrap();

        assert_eq!(user.display_name, "Mina");
        assert_eq!(user.primary_type.unwrap().as_str(), "ENFP");
        assert_eq!(user.secondary_type, Some(SecondaryType::Iee));
        assert_eq!(user.primary_confidence, 0.8);
    }

    #[test]
    fn builder_treats_malformed_codes_as_unknown() {
        let user = UserVector::builder("u1", &[50.0; 5])
            .primary_type("XNTP", 0.9)
            .secondary_type("Unknown", 0.9)
            .build()
            .unwrap();

        assert!(user.primary_type.is_none());
        assert!(user.secondary_type.is_none());
    }

    #[test]
    fn builder_clamps_confidence() {
        let user = UserVector::builder("u1", &[50.0; 5])
            .primary_type("ISTJ", 1.4)
            .trait_confidence(-0.3)
            .build()
            .unwrap();

        assert_eq!(user.primary_confidence, 1.0);
        assert_eq!(user.trait_confidence, 0.0);
    }

    #[test]
    fn builder_rejects_nan_confidence() {
        let result = UserVector::builder("u1", &[50.0; 5])
            .secondary_type("ILE", f64::NAN)
            .build();
        assert_eq!(
            result,
            Err(MatchingError::NonFiniteValue {
                field: "secondary_confidence"
            })
        );
    }

    #[test]
    fn builder_rejects_bad_arity() {
        let result = UserVector::builder("u1", &[50.0; 6]).build();
        assert!(matches!(
            result,
            Err(MatchingError::InvalidTraitArity { expected: 5, actual: 6 })
        ));
    }

    #[test]
    fn builder_rejects_empty_id() {
        let result = UserVector::builder("", &[50.0; 5]).build();
        assert!(matches!(result, Err(MatchingError::Validation(_))));
    }
}
