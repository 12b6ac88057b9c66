//! Orchestrator configuration types

use std::time::Duration;

use crate::analysis_pipeline::common::random::RngFactory;
use crate::analysis_pipeline::fallback::{FallbackHeatmapGenerator, FallbackProfile};
use crate::analysis_pipeline::render::{
    DEFAULT_JPEG_QUALITY, DEFAULT_OVERLAY_OPACITY, FALLBACK_PEAK_ALPHA, HeatmapRenderer,
    SALIENCY_PEAK_ALPHA,
};

/// Configuration for the analysis orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Peak heat opacity when rendering real saliency
    pub saliency_peak_alpha: u8,
    /// Peak heat opacity when rendering the geometric fallback
    pub fallback_peak_alpha: u8,
    /// Opacity the original image is drawn with over the heat layer
    pub overlay_opacity: f32,
    /// JPEG quality of rendered heatmaps (1-100)
    pub jpeg_quality: u8,
    /// Geometric prior used by the fallback generator
    pub fallback_profile: FallbackProfile,
    /// Upper bound on image loading and on the scoring call; a track that
    /// exceeds it takes its fallback. `None` waits indefinitely.
    pub track_timeout: Option<Duration>,
    /// Seed for fallback jitter and suggestion shuffles. `None` draws from
    /// the OS entropy source.
    pub rng_seed: Option<u64>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            saliency_peak_alpha: SALIENCY_PEAK_ALPHA,
            fallback_peak_alpha: FALLBACK_PEAK_ALPHA,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            fallback_profile: FallbackProfile::default(),
            track_timeout: None,
            rng_seed: None,
        }
    }
}

impl OrchestratorConfig {
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::default()
    }

    pub fn saliency_renderer(&self) -> HeatmapRenderer {
        HeatmapRenderer::saliency()
            .with_overlay_opacity(self.overlay_opacity)
            .with_jpeg_quality(self.jpeg_quality)
            .with_peak_alpha(self.saliency_peak_alpha)
    }

    pub fn fallback_generator(&self) -> FallbackHeatmapGenerator {
        let renderer = HeatmapRenderer::fallback()
            .with_overlay_opacity(self.overlay_opacity)
            .with_jpeg_quality(self.jpeg_quality)
            .with_peak_alpha(self.fallback_peak_alpha);
        FallbackHeatmapGenerator::new(renderer, self.fallback_profile)
    }

    pub fn rng_factory(&self) -> RngFactory {
        RngFactory::new(self.rng_seed)
    }
}

/// Builder for OrchestratorConfig
#[derive(Default)]
pub struct OrchestratorConfigBuilder {
    saliency_peak_alpha: Option<u8>,
    fallback_peak_alpha: Option<u8>,
    overlay_opacity: Option<f32>,
    jpeg_quality: Option<u8>,
    fallback_profile: Option<FallbackProfile>,
    track_timeout: Option<Option<Duration>>,
    rng_seed: Option<Option<u64>>,
}

impl OrchestratorConfigBuilder {
    pub fn saliency_peak_alpha(mut self, alpha: u8) -> Self {
        self.saliency_peak_alpha = Some(alpha);
        self
    }

    pub fn fallback_peak_alpha(mut self, alpha: u8) -> Self {
        self.fallback_peak_alpha = Some(alpha);
        self
    }

    pub fn overlay_opacity(mut self, opacity: f32) -> Self {
        self.overlay_opacity = Some(opacity);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn fallback_profile(mut self, profile: FallbackProfile) -> Self {
        self.fallback_profile = Some(profile);
        self
    }

    pub fn track_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.track_timeout = Some(timeout);
        self
    }

    pub fn rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> OrchestratorConfig {
        let default = OrchestratorConfig::default();
        OrchestratorConfig {
            saliency_peak_alpha: self.saliency_peak_alpha.unwrap_or(default.saliency_peak_alpha),
            fallback_peak_alpha: self.fallback_peak_alpha.unwrap_or(default.fallback_peak_alpha),
            overlay_opacity: self.overlay_opacity.unwrap_or(default.overlay_opacity),
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            fallback_profile: self.fallback_profile.unwrap_or(default.fallback_profile),
            track_timeout: self.track_timeout.unwrap_or(default.track_timeout),
            rng_seed: self.rng_seed.unwrap_or(default.rng_seed),
        }
    }
}
