//! Saving and restoring analysis results
//!
//! Results are stored as a pretty-printed JSON array with the same camelCase
//! keys the API exposes. Rendered heatmaps are written next to it as JPEGs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::analysis_pipeline::common::error::Result;
use crate::analysis_pipeline::orchestrator::AnalysisResult;

pub fn save_results(path: impl AsRef<Path>, results: &[AnalysisResult]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json)?;
    info!("Saved {} results to {}", results.len(), path.display());
    Ok(())
}

/// Reads results written by [`save_results`]. Heatmap bytes are not stored
/// in the JSON, so every restored result has `heatmap_jpeg == None`.
pub fn load_results(path: impl AsRef<Path>) -> Result<Vec<AnalysisResult>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let results: Vec<AnalysisResult> = serde_json::from_str(&json)?;
    debug!("Loaded {} results from {}", results.len(), path.display());
    Ok(results)
}

/// Writes `<image_id>-heatmap.jpg` into `dir` for every rendered heatmap and
/// returns the paths written. Results whose heatmap is the original image
/// are skipped.
pub fn write_heatmaps(dir: impl AsRef<Path>, results: &[AnalysisResult]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for result in results {
        let Some(bytes) = result.heatmap_jpeg.as_deref() else {
            debug!(image_id = %result.image_id, "No rendered heatmap to write");
            continue;
        };
        let path = dir.join(format!("{}-heatmap.jpg", result.image_id));
        fs::write(&path, bytes)?;
        written.push(path);
    }
    Ok(written)
}
