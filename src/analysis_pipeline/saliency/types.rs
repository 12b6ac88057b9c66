//! Saliency field types

use crate::analysis_pipeline::common::error::{AnalysisError, Result};

/// Row-major scalar attention map with every value in `[0,1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SaliencyField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl SaliencyField {
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Result<Self> {
        if values.len() != width * height {
            return Err(AnalysisError::SaliencyCompute(format!(
                "field has {} values for {}x{}",
                values.len(),
                width,
                height
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0) {
            return Err(AnalysisError::SaliencyCompute(format!(
                "field value {} outside [0,1]",
                bad
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }
}
