//! Structured-output schema for the packaging analysis.
//!
//! The same definition is sent to the model as a strict JSON schema and used
//! to validate whatever comes back, so a malformed reply turns into a
//! `Scoring` error here instead of leaking half-parsed data downstream.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::analysis_pipeline::common::error::{AnalysisError, Result};
use crate::analysis_pipeline::scoring::types::ScoreSet;

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 10.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackagingAnalysis {
    attention_score: f64,
    color_impact: f64,
    readability: f64,
    brand_visibility: f64,
    suggestions: Vec<String>,
    analysis: String,
}

pub struct PackagingAnalysisSchema;

impl PackagingAnalysisSchema {
    pub const NAME: &'static str = "packageAnalysis";

    pub fn json_schema() -> Value {
        let score = |description: &str| {
            json!({
                "type": "number",
                "description": description,
            })
        };
        json!({
            "type": "object",
            "properties": {
                "attentionScore": score("Overall attention score (1-10) based on visual hierarchy, focal point strength, and eye-tracking patterns"),
                "colorImpact": score("Impact of color choices (1-10) evaluating contrast, palette cohesion, and emotional resonance"),
                "readability": score("Readability of on-pack text (1-10) assessing font choice, sizing, contrast, and information hierarchy"),
                "brandVisibility": score("Brand/logo visibility (1-10) measuring prominence, placement, and memorability"),
                "suggestions": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Specific, actionable design improvement suggestions",
                },
                "analysis": {
                    "type": "string",
                    "description": "Comprehensive analysis of the packaging design with specific strengths and weaknesses",
                },
            },
            "required": ["attentionScore", "colorImpact", "readability", "brandVisibility", "suggestions", "analysis"],
            "additionalProperties": false,
        })
    }

    /// Parses and checks the model's JSON text, deriving the overall score.
    pub fn validate(text: &str) -> Result<ScoreSet> {
        let raw: RawPackagingAnalysis = serde_json::from_str(text)
            .map_err(|e| AnalysisError::Scoring(format!("malformed analysis: {}", e)))?;

        for (name, value) in [
            ("attentionScore", raw.attention_score),
            ("colorImpact", raw.color_impact),
            ("readability", raw.readability),
            ("brandVisibility", raw.brand_visibility),
        ] {
            if !value.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&value) {
                return Err(AnalysisError::Scoring(format!(
                    "{} = {} is outside {}-{}",
                    name, value, SCORE_MIN, SCORE_MAX
                )));
            }
        }

        Ok(ScoreSet::new(
            raw.attention_score,
            raw.color_impact,
            raw.readability,
            raw.brand_visibility,
            raw.suggestions,
            raw.analysis,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "attentionScore": 8,
        "colorImpact": 7.5,
        "readability": 6,
        "brandVisibility": 9,
        "suggestions": ["Enlarge the logo"],
        "analysis": "Strong focal point."
    }"#;

    #[test]
    fn test_valid_response_derives_overall() {
        let scores = PackagingAnalysisSchema::validate(VALID).unwrap();
        assert_eq!(scores.attention_score, 8.0);
        assert_eq!(scores.overall_score, 7.6);
        assert_eq!(scores.suggestions, vec!["Enlarge the logo".to_string()]);
        assert_eq!(scores.analysis, "Strong focal point.");
    }

    #[test]
    fn test_upstream_overall_is_ignored() {
        let text = VALID.replace("\"analysis\"", "\"overallScore\": 1, \"analysis\"");
        let scores = PackagingAnalysisSchema::validate(&text).unwrap();
        assert_eq!(scores.overall_score, 7.6);
    }

    #[test]
    fn test_missing_field_is_scoring_error() {
        let text = r#"{"attentionScore": 8, "colorImpact": 7, "readability": 6, "suggestions": [], "analysis": ""}"#;
        assert!(matches!(
            PackagingAnalysisSchema::validate(text),
            Err(AnalysisError::Scoring(_))
        ));
    }

    #[test]
    fn test_out_of_range_score_is_scoring_error() {
        let text = VALID.replace("\"readability\": 6", "\"readability\": 11");
        assert!(matches!(
            PackagingAnalysisSchema::validate(&text),
            Err(AnalysisError::Scoring(_))
        ));
    }

    #[test]
    fn test_wrong_type_is_scoring_error() {
        let text = VALID.replace("[\"Enlarge the logo\"]", "\"Enlarge the logo\"");
        assert!(PackagingAnalysisSchema::validate(&text).is_err());
        assert!(PackagingAnalysisSchema::validate("not json").is_err());
    }

    #[test]
    fn test_schema_requires_every_property() {
        let schema = PackagingAnalysisSchema::json_schema();
        let required = schema["required"].as_array().unwrap();
        let properties = schema["properties"].as_object().unwrap();
        assert_eq!(required.len(), properties.len());
    }
}
