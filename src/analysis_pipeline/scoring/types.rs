//! Score types

use serde::{Deserialize, Serialize};

/// Four quality sub-scores on a 1–10 scale plus their derived overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    pub attention_score: f64,
    pub color_impact: f64,
    pub readability: f64,
    pub brand_visibility: f64,
    pub overall_score: f64,
    pub suggestions: Vec<String>,
    pub analysis: String,
}

impl ScoreSet {
    /// The overall score is always derived here, never taken from upstream.
    pub fn new(
        attention_score: f64,
        color_impact: f64,
        readability: f64,
        brand_visibility: f64,
        suggestions: Vec<String>,
        analysis: impl Into<String>,
    ) -> Self {
        Self {
            attention_score,
            color_impact,
            readability,
            brand_visibility,
            overall_score: overall_score(attention_score, color_impact, readability, brand_visibility),
            suggestions,
            analysis: analysis.into(),
        }
    }

    /// Every sub-score set to `score`.
    pub fn uniform(score: f64, suggestions: Vec<String>, analysis: impl Into<String>) -> Self {
        Self::new(score, score, score, score, suggestions, analysis)
    }
}

/// Mean of the four sub-scores, rounded to one decimal.
pub fn overall_score(attention: f64, color: f64, readability: f64, brand: f64) -> f64 {
    round1((attention + color + readability + brand) / 4.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
