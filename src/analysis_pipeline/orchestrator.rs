//! Analysis orchestration module
//!
//! Runs the heatmap track (load, saliency, render, with geometric and
//! original-image fallbacks) alongside the scoring track for every image of a
//! batch and joins both into one [`AnalysisResult`] per image.

mod config;
mod pipeline;
pub mod types;


pub use config::{OrchestratorConfig, OrchestratorConfigBuilder};
pub use pipeline::AnalysisOrchestrator;
pub use types::{AnalysisResult, ScoreOrigin};
