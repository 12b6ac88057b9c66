//! Heatmap artifact types

use serde::{Deserialize, Serialize};

use crate::analysis_pipeline::loader::types::data_url;

/// Which path of the heatmap track produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapOrigin {
    /// Saliency engine followed by the heatmap renderer.
    Saliency,
    /// Geometric fallback generator.
    Fallback,
    /// Both generators failed; the original image stands in.
    Original,
}

/// An encoded heatmap, displayable through its `src` reference.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapArtifact {
    origin: HeatmapOrigin,
    src: String,
    encoded: Option<Vec<u8>>,
}

impl HeatmapArtifact {
    pub const JPEG_MIME: &'static str = "image/jpeg";

    pub fn jpeg(origin: HeatmapOrigin, bytes: Vec<u8>) -> Self {
        Self {
            origin,
            src: data_url(Self::JPEG_MIME, &bytes),
            encoded: Some(bytes),
        }
    }

    /// Reuses the original image reference as the heatmap.
    pub fn original(reference: impl Into<String>) -> Self {
        Self {
            origin: HeatmapOrigin::Original,
            src: reference.into(),
            encoded: None,
        }
    }

    pub fn origin(&self) -> HeatmapOrigin {
        self.origin
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// JPEG bytes, when this artifact was rendered rather than substituted.
    pub fn encoded_bytes(&self) -> Option<&[u8]> {
        self.encoded.as_deref()
    }

    pub fn into_parts(self) -> (HeatmapOrigin, String, Option<Vec<u8>>) {
        (self.origin, self.src, self.encoded)
    }
}
