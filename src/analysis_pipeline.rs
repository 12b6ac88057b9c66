//! Packaging attention analysis pipeline
//!
//! Each image of a batch goes through two independent tracks: a visual
//! attention heatmap (loader, saliency engine, renderer, with fallbacks) and
//! an external design scoring call (with synthesized scores as fallback).
//! The orchestrator joins both into one result per image.

pub mod common;
pub mod fallback;
pub mod loader;
pub mod orchestrator;
pub mod persistence;
pub mod render;
pub mod saliency;
pub mod scoring;

pub use common::{AnalysisError, Result};

pub use loader::{ImageInput, ImageLoader, ImageSource, PixelBuffer, StandardImageLoader};

pub use saliency::{ContrastSaliencyEngine, SaliencyEngine, SaliencyField};

pub use render::{HeatmapArtifact, HeatmapOrigin, HeatmapRenderer};

pub use fallback::{FallbackHeatmapGenerator, FallbackProfile};

pub use scoring::{ScoreSet, ScoringAdapter, ScoringConfig, VisionScoringClient};

pub use orchestrator::{
    AnalysisOrchestrator, AnalysisResult, OrchestratorConfig, OrchestratorConfigBuilder,
    ScoreOrigin,
};

pub use persistence::{load_results, save_results, write_heatmaps};
