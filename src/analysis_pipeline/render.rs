//! Heatmap rendering module
//!
//! Maps a saliency field to colors, composites the original image over it
//! and encodes the result as a displayable JPEG.

pub mod colormap;
mod renderer;
pub mod types;

pub use colormap::heat_color;
pub use renderer::{
    DEFAULT_JPEG_QUALITY, DEFAULT_OVERLAY_OPACITY, FALLBACK_PEAK_ALPHA, HeatmapRenderer,
    SALIENCY_PEAK_ALPHA,
};
pub use types::{HeatmapArtifact, HeatmapOrigin};
