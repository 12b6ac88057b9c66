//! Geometric fallback heatmaps
//!
//! When saliency computation or rendering fails the heatmap track still needs
//! something plausible to show. Viewers look first at the center of a pack
//! and at its top third, so this generator derives heat purely from pixel
//! position plus a little jitter and renders it the same way as real saliency.

use rand::Rng;
use tracing::debug;

use crate::analysis_pipeline::common::error::Result;
use crate::analysis_pipeline::loader::types::PixelBuffer;
use crate::analysis_pipeline::render::{HeatmapArtifact, HeatmapRenderer};
use crate::analysis_pipeline::saliency::types::SaliencyField;

/// Shape of the geometric attention prior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackProfile {
    /// `(1 - d/(w/2)) * 0.7`, +0.3 in the top third, jitter in `[0, 0.1)`.
    #[default]
    CenterTop,
    /// `1 - 0.6 * d/d_max`, +0.2 in the top third, jitter in `[0, 0.2)`.
    /// A gentler falloff that keeps the whole pack warm.
    SoftCenter,
}

#[derive(Debug, Clone)]
pub struct FallbackHeatmapGenerator {
    renderer: HeatmapRenderer,
    profile: FallbackProfile,
}

impl Default for FallbackHeatmapGenerator {
    fn default() -> Self {
        Self::new(HeatmapRenderer::fallback(), FallbackProfile::default())
    }
}

impl FallbackHeatmapGenerator {
    pub fn new(renderer: HeatmapRenderer, profile: FallbackProfile) -> Self {
        Self { renderer, profile }
    }

    pub fn profile(&self) -> FallbackProfile {
        self.profile
    }

    /// Builds the geometric field for a `width`x`height` image.
    pub fn field<R: Rng + ?Sized>(&self, width: usize, height: usize, rng: &mut R) -> Result<SaliencyField> {
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        let top_third = height as f64 / 3.0;
        let max_dist = (cx * cx + cy * cy).sqrt();

        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            let in_top = (y as f64) < top_third;
            for x in 0..width {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                let dist = (dx * dx + dy * dy).sqrt();

                let heat = match self.profile {
                    FallbackProfile::CenterTop => {
                        let d = if cx > 0.0 { dist / cx } else { 0.0 };
                        (1.0 - d) * 0.7 + if in_top { 0.3 } else { 0.0 } + rng.gen_range(0.0..0.1)
                    }
                    FallbackProfile::SoftCenter => {
                        let d = if max_dist > 0.0 { dist / max_dist } else { 0.0 };
                        1.0 - d * 0.6 + if in_top { 0.2 } else { 0.0 } + rng.gen_range(0.0..0.2)
                    }
                };
                values.push(heat.clamp(0.0, 1.0) as f32);
            }
        }
        SaliencyField::new(width, height, values)
    }

    /// Renders the geometric heatmap composited over `image`.
    pub fn generate<R: Rng + ?Sized>(&self, image: &PixelBuffer, rng: &mut R) -> Result<HeatmapArtifact> {
        debug!(
            "Generating {:?} fallback heatmap for {}x{}",
            self.profile,
            image.width(),
            image.height()
        );
        let field = self.field(image.width(), image.height(), rng)?;
        self.renderer.render(&field, Some(image))
    }
}
