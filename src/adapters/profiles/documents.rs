//! Wire documents accepted as profile input.
//!
//! Two shapes are recognized:
//!
//! - a flat trait record (`user_id`, `traits`, optional type codes)
//! - a nested analysis report (`meta`, `llm_profile`, `parse_quality`)
//!
//! A candidate file is either a bare array of documents or an object with a
//! `candidates` array. Each document is decoded on its own so one bad entry
//! does not sink the file.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::matching::{MatchingError, TraitDimension, UserVector};

/// Identifier that may arrive as a JSON string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Flat per-person record.
#[derive(Debug, Clone, Deserialize)]
pub struct TraitRecord {
    pub user_id: RawId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub primary_type: Option<String>,
    #[serde(default)]
    pub primary_confidence: Option<f64>,
    pub traits: Vec<f64>,
    #[serde(default)]
    pub trait_confidence: Option<f64>,
    #[serde(default)]
    pub secondary_type: Option<String>,
    #[serde(default)]
    pub secondary_confidence: Option<f64>,
    #[serde(default)]
    pub activity_count: u32,
}

/// Nested report produced by the upstream analysis step.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisReport {
    pub meta: ReportMeta,
    pub llm_profile: LlmProfile,
    #[serde(default)]
    pub parse_quality: ParseQuality,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportMeta {
    pub user_id: RawId,
    #[serde(default)]
    pub speaker_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProfile {
    #[serde(default)]
    pub mbti: Option<TypeAssessment>,
    pub big5: Big5Assessment,
    #[serde(default)]
    pub socionics: Option<TypeAssessment>,
}

/// A type code guess with its confidence. A missing or null confidence
/// counts as zero.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeAssessment {
    #[serde(default, rename = "type")]
    pub code: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Big5Assessment {
    pub scores_0_100: Big5Scores,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Named Big Five scores. Missing dimensions surface as an arity error.
#[derive(Debug, Clone, Deserialize)]
pub struct Big5Scores {
    #[serde(default)]
    pub openness: Option<f64>,
    #[serde(default)]
    pub conscientiousness: Option<f64>,
    #[serde(default)]
    pub extraversion: Option<f64>,
    #[serde(default)]
    pub agreeableness: Option<f64>,
    #[serde(default)]
    pub neuroticism: Option<f64>,
}

impl Big5Scores {
    fn get(&self, dimension: TraitDimension) -> Option<f64> {
        match dimension {
            TraitDimension::Openness => self.openness,
            TraitDimension::Conscientiousness => self.conscientiousness,
            TraitDimension::Extraversion => self.extraversion,
            TraitDimension::Agreeableness => self.agreeableness,
            TraitDimension::Neuroticism => self.neuroticism,
        }
    }

    /// Present scores in canonical dimension order.
    fn to_vec(&self) -> Vec<f64> {
        TraitDimension::ALL
            .iter()
            .filter_map(|d| self.get(*d))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseQuality {
    #[serde(default)]
    pub parsed_lines: u32,
}

/// Any single profile document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileDocument {
    Record(TraitRecord),
    Report(AnalysisReport),
}

impl ProfileDocument {
    /// Decodes one document from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Validates the document into a scoring input.
    pub fn into_user_vector(self) -> Result<UserVector, MatchingError> {
        match self {
            ProfileDocument::Record(record) => {
                let mut builder = UserVector::builder(record.user_id.into_string(), &record.traits)
                    .trait_confidence(record.trait_confidence.unwrap_or(0.0))
                    .activity_count(record.activity_count);
                if let Some(name) = record.display_name {
                    builder = builder.display_name(name);
                }
                if let Some(code) = record.primary_type {
                    builder = builder.primary_type(code, record.primary_confidence.unwrap_or(0.0));
                }
                if let Some(code) = record.secondary_type {
                    builder = builder.secondary_type(code, record.secondary_confidence.unwrap_or(0.0));
                }
                builder.build()
            }
            ProfileDocument::Report(report) => {
                let profile = report.llm_profile;
                let mut builder = UserVector::builder(
                    report.meta.user_id.into_string(),
                    &profile.big5.scores_0_100.to_vec(),
                )
                .trait_confidence(profile.big5.confidence.unwrap_or(0.0))
                .activity_count(report.parse_quality.parsed_lines);
                if let Some(name) = report.meta.speaker_name {
                    builder = builder.display_name(name);
                }
                if let Some(TypeAssessment {
                    code: Some(code),
                    confidence,
                }) = profile.mbti
                {
                    builder = builder.primary_type(code, confidence.unwrap_or(0.0));
                }
                if let Some(TypeAssessment {
                    code: Some(code),
                    confidence,
                }) = profile.socionics
                {
                    builder = builder.secondary_type(code, confidence.unwrap_or(0.0));
                }
                builder.build()
            }
        }
    }
}

/// Top level of a candidate file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CandidateFile {
    List(Vec<Value>),
    Wrapped { candidates: Vec<Value> },
}

impl CandidateFile {
    /// Raw, not-yet-validated entries.
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            CandidateFile::List(entries) => entries,
            CandidateFile::Wrapped { candidates } => candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::{SecondaryType, TRAIT_COUNT};
    use serde_json::json;

    #[test]
    fn flat_record_decodes_with_defaults() {
        let doc = ProfileDocument::from_value(json!({
            "user_id": "u1",
            "traits": [10, 20, 30, 40, 50]
        }))
        .unwrap();
        let user = doc.into_user_vector().unwrap();

        assert_eq!(user.user_id.as_str(), "u1");
        assert_eq!(user.display_name, "u1");
        assert!(user.primary_type.is_none());
        assert!(user.secondary_type.is_none());
        assert_eq!(user.activity_count, 0);
        assert_eq!(user.traits.as_array(), &[10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn flat_record_carries_type_codes() {
        let doc = ProfileDocument::from_value(json!({
            "user_id": 42,
            "display_name": "Kim",
            "primary_type": "entp",
            "primary_confidence": 0.8,
            "traits": [60, 50, 70, 40, 30],
            "trait_confidence": 0.9,
            "secondary_type": "ile",
            "secondary_confidence": 1.4,
            "activity_count": 120
        }))
        .unwrap();
        let user = doc.into_user_vector().unwrap();

        assert_eq!(user.user_id.as_str(), "42");
        assert_eq!(user.display_name, "Kim");
        assert_eq!(user.primary_type.unwrap().as_str(), "ENTP");
        assert_eq!(user.secondary_type, Some(SecondaryType::Ile));
        assert_eq!(user.secondary_confidence, 1.0);
        assert_eq!(user.activity_count, 120);
    }

    #[test]
    fn nested_report_maps_onto_user_vector() {
        let doc = ProfileDocument::from_value(json!({
            "meta": { "user_id": "r7", "speaker_name": "Jae" },
            "llm_profile": {
                "mbti": { "type": "INFJ", "confidence": 0.7 },
                "big5": {
                    "scores_0_100": {
                        "openness": 81,
                        "conscientiousness": 55,
                        "extraversion": 22,
                        "agreeableness": 74,
                        "neuroticism": 48
                    },
                    "confidence": 0.6
                },
                "socionics": { "type": "EII", "confidence": 0.5 }
            },
            "parse_quality": { "parsed_lines": 314 }
        }))
        .unwrap();
        let user = doc.into_user_vector().unwrap();

        assert_eq!(user.user_id.as_str(), "r7");
        assert_eq!(user.display_name, "Jae");
        assert_eq!(user.primary_type.unwrap().as_str(), "INFJ");
        assert_eq!(user.secondary_type, Some(SecondaryType::Eii));
        assert_eq!(user.activity_count, 314);
        assert_eq!(user.traits.as_array(), &[81.0, 55.0, 22.0, 74.0, 48.0]);
        assert_eq!(user.trait_confidence, 0.6);
    }

    #[test]
    fn nested_report_null_confidences_default_to_zero() {
        let doc = ProfileDocument::from_value(json!({
            "meta": { "user_id": "r9" },
            "llm_profile": {
                "mbti": { "type": "ENFP", "confidence": null },
                "big5": {
                    "scores_0_100": {
                        "openness": 60,
                        "conscientiousness": 40,
                        "extraversion": 70,
                        "agreeableness": 55,
                        "neuroticism": 35
                    },
                    "confidence": null
                },
                "socionics": { "type": "IEE" }
            }
        }))
        .unwrap();
        let user = doc.into_user_vector().unwrap();

        assert_eq!(user.primary_type.unwrap().as_str(), "ENFP");
        assert_eq!(user.primary_confidence, 0.0);
        assert_eq!(user.trait_confidence, 0.0);
        assert_eq!(user.secondary_type, Some(SecondaryType::Iee));
        assert_eq!(user.secondary_confidence, 0.0);
    }

    #[test]
    fn flat_record_null_confidence_defaults_to_zero() {
        let doc = ProfileDocument::from_value(json!({
            "user_id": "f1",
            "primary_type": "ISTP",
            "primary_confidence": null,
            "traits": [50, 50, 50, 50, 50],
            "trait_confidence": null
        }))
        .unwrap();
        let user = doc.into_user_vector().unwrap();

        assert_eq!(user.primary_confidence, 0.0);
        assert_eq!(user.trait_confidence, 0.0);
    }

    #[test]
    fn nested_report_missing_dimension_is_arity_error() {
        let doc = ProfileDocument::from_value(json!({
            "meta": { "user_id": "r8" },
            "llm_profile": {
                "big5": { "scores_0_100": { "openness": 50, "extraversion": 50 } }
            }
        }))
        .unwrap();

        assert_eq!(
            doc.into_user_vector(),
            Err(MatchingError::InvalidTraitArity {
                expected: TRAIT_COUNT,
                actual: 2
            })
        );
    }

    #[test]
    fn unrecognized_document_fails_to_decode() {
        assert!(ProfileDocument::from_value(json!({ "name": "nobody" })).is_err());
    }

    #[test]
    fn candidate_file_accepts_both_shapes() {
        let list: CandidateFile = serde_json::from_value(json!([{}, {}])).unwrap();
        assert_eq!(list.into_entries().len(), 2);

        let wrapped: CandidateFile =
            serde_json::from_value(json!({ "candidates": [{}, {}, {}] })).unwrap();
        assert_eq!(wrapped.into_entries().len(), 3);
    }
}
