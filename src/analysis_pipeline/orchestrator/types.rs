use serde::{Deserialize, Serialize};

use crate::analysis_pipeline::render::{HeatmapArtifact, HeatmapOrigin};
use crate::analysis_pipeline::scoring::ScoreSet;

/// Which path of the scoring track produced the scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreOrigin {
    Remote,
    Synthesized,
}

/// Joined outcome of both tracks for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub image_id: String,
    pub original_src: String,
    pub heatmap_src: String,
    pub heatmap_origin: HeatmapOrigin,
    pub attention_score: f64,
    pub color_impact: f64,
    pub readability: f64,
    pub brand_visibility: f64,
    pub overall_score: f64,
    pub suggestions: Vec<String>,
    pub ai_analysis: String,
    pub score_origin: ScoreOrigin,
    /// Encoded heatmap, kept for writers. Absent when the original stands in.
    #[serde(skip)]
    pub heatmap_jpeg: Option<Vec<u8>>,
}

impl AnalysisResult {
    pub fn new(
        image_id: impl Into<String>,
        original_src: impl Into<String>,
        heatmap: HeatmapArtifact,
        scores: ScoreSet,
        score_origin: ScoreOrigin,
    ) -> Self {
        let (heatmap_origin, heatmap_src, heatmap_jpeg) = heatmap.into_parts();
        Self {
            image_id: image_id.into(),
            original_src: original_src.into(),
            heatmap_src,
            heatmap_origin,
            attention_score: scores.attention_score,
            color_impact: scores.color_impact,
            readability: scores.readability,
            brand_visibility: scores.brand_visibility,
            overall_score: scores.overall_score,
            suggestions: scores.suggestions,
            ai_analysis: scores.analysis,
            score_origin,
            heatmap_jpeg,
        }
    }

    /// True when either track fell back.
    pub fn is_degraded(&self) -> bool {
        self.heatmap_origin != HeatmapOrigin::Saliency || self.score_origin != ScoreOrigin::Remote
    }
}
