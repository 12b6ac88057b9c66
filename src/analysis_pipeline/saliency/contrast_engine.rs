//! Contrast and color-distinctiveness saliency.
//!
//! The field is the even blend of two cues:
//! 1. local contrast, the absolute difference between a 3x3 and a 5x5 box
//!    blur of luminance (a cheap difference-of-smoothing edge detector);
//! 2. color uniqueness, each pixel's RGB distance from the image's mean color.
//!
//! The blend is min-max normalized with a small epsilon in the denominator so
//! a perfectly uniform image yields an all-zero field rather than NaN.

use tracing::debug;

use crate::analysis_pipeline::common::error::{AnalysisError, Result};
use crate::analysis_pipeline::loader::types::PixelBuffer;
use crate::analysis_pipeline::saliency::engine::SaliencyEngine;
use crate::analysis_pipeline::saliency::types::SaliencyField;

/// Rec. 601 luma weights.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

const FINE_WINDOW: usize = 3;
const COARSE_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct ContrastSaliencyEngine {
    pub contrast_weight: f32,
    pub color_weight: f32,
    pub epsilon: f32,
}

impl Default for ContrastSaliencyEngine {
    fn default() -> Self {
        Self {
            contrast_weight: 0.5,
            color_weight: 0.5,
            epsilon: 1e-5,
        }
    }
}

impl SaliencyEngine for ContrastSaliencyEngine {
    fn compute(&self, image: &PixelBuffer) -> Result<SaliencyField> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(AnalysisError::SaliencyCompute(format!(
                "cannot compute saliency of a {}x{} image",
                width, height
            )));
        }
        debug!("Computing saliency for {}x{}", width, height);

        let rgb: Vec<[f32; 3]> = image
            .pixels()
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                ]
            })
            .collect();

        let luma: Vec<f32> = rgb
            .iter()
            .map(|c| LUMA_WEIGHTS[0] * c[0] + LUMA_WEIGHTS[1] * c[1] + LUMA_WEIGHTS[2] * c[2])
            .collect();

        let fine = box_blur(&luma, width, height, FINE_WINDOW);
        let coarse = box_blur(&luma, width, height, COARSE_WINDOW);

        let mean = mean_color(&rgb);
        let combined: Vec<f32> = rgb
            .iter()
            .zip(fine.iter().zip(coarse.iter()))
            .map(|(c, (f, k))| {
                let contrast = (f - k).abs();
                let dr = c[0] - mean[0];
                let dg = c[1] - mean[1];
                let db = c[2] - mean[2];
                let uniqueness = (dr * dr + dg * dg + db * db).sqrt();
                self.contrast_weight * contrast + self.color_weight * uniqueness
            })
            .collect();

        let values = self.normalize(combined)?;
        SaliencyField::new(width, height, values)
    }
}

impl ContrastSaliencyEngine {
    fn normalize(&self, mut values: Vec<f32>) -> Result<Vec<f32>> {
        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() || !max.is_finite() || values.iter().any(|v| !v.is_finite()) {
            return Err(AnalysisError::SaliencyCompute(
                "non-finite saliency value".to_string(),
            ));
        }

        let denom = max - min + self.epsilon;
        for v in values.iter_mut() {
            *v = ((*v - min) / denom).clamp(0.0, 1.0);
        }
        Ok(values)
    }
}

fn mean_color(rgb: &[[f32; 3]]) -> [f32; 3] {
    let mut sum = [0.0f64; 3];
    for c in rgb {
        sum[0] += c[0] as f64;
        sum[1] += c[1] as f64;
        sum[2] += c[2] as f64;
    }
    let n = rgb.len().max(1) as f64;
    [
        (sum[0] / n) as f32,
        (sum[1] / n) as f32,
        (sum[2] / n) as f32,
    ]
}

/// Same-size box average over a `window`x`window` neighbourhood with edge
/// replication. Done as two 1-D passes, which is exact for a box kernel.
fn box_blur(values: &[f32], width: usize, height: usize, window: usize) -> Vec<f32> {
    let radius = (window / 2) as isize;
    let norm = window as f32;

    let clamp = |v: isize, hi: usize| -> usize { v.clamp(0, hi as isize - 1) as usize };

    let mut horizontal = vec![0.0f32; values.len()];
    for y in 0..height {
        let row = &values[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0f32;
            for dx in -radius..=radius {
                acc += row[clamp(x as isize + dx, width)];
            }
            horizontal[y * width + x] = acc / norm;
        }
    }

    let mut out = vec![0.0f32; values.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for dy in -radius..=radius {
                acc += horizontal[clamp(y as isize + dy, height) * width + x];
            }
            out[y * width + x] = acc / norm;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_on_gray(size: usize, square: std::ops::Range<usize>) -> PixelBuffer {
        let mut data = Vec::with_capacity(size * size * 4);
        for y in 0..size {
            for x in 0..size {
                if square.contains(&x) && square.contains(&y) {
                    data.extend_from_slice(&[220, 20, 20, 255]);
                } else {
                    data.extend_from_slice(&[128, 128, 128, 255]);
                }
            }
        }
        PixelBuffer::new(size, size, data).unwrap()
    }

    #[test]
    fn test_box_blur_replicates_edges() {
        let blurred = box_blur(&[0.0, 0.0, 9.0], 3, 1, 3);
        assert_eq!(blurred, vec![0.0, 3.0, 6.0]);
    }

    #[test]
    fn test_box_blur_of_constant_is_constant() {
        let blurred = box_blur(&vec![0.25; 20], 5, 4, 5);
        assert!(blurred.iter().all(|v| (v - 0.25).abs() < 1e-6));
    }

    #[test]
    fn test_uniform_gray_resolves_to_zero_field() {
        let image = PixelBuffer::filled(100, 100, [128, 128, 128, 255]).unwrap();
        let field = ContrastSaliencyEngine::default().compute(&image).unwrap();

        assert_eq!(field.width(), 100);
        assert_eq!(field.height(), 100);
        assert!(field.values().iter().all(|v| v.is_finite() && *v == 0.0));
    }

    #[test]
    fn test_all_black_image_does_not_fail() {
        let image = PixelBuffer::filled(16, 16, [0, 0, 0, 255]).unwrap();
        let field = ContrastSaliencyEngine::default().compute(&image).unwrap();
        assert!(field.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_values_are_normalized() {
        let image = square_on_gray(40, 10..20);
        let field = ContrastSaliencyEngine::default().compute(&image).unwrap();

        assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));
        let max = field.values().iter().cloned().fold(0.0f32, f32::max);
        assert!(max > 0.99);
    }

    #[test]
    fn test_distinct_region_is_more_salient_than_background() {
        let image = square_on_gray(40, 10..20);
        let field = ContrastSaliencyEngine::default().compute(&image).unwrap();

        assert!(field.get(15, 15) > field.get(35, 35));
        assert!(field.get(15, 15) > 0.5);
    }

    #[test]
    fn test_zero_sized_image_is_compute_error() {
        let image = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        let result = ContrastSaliencyEngine::default().compute(&image);
        assert!(matches!(result, Err(AnalysisError::SaliencyCompute(_))));
    }

    #[test]
    fn test_output_matches_input_dimensions() {
        let image = PixelBuffer::filled(13, 7, [10, 200, 30, 255]).unwrap();
        let field = ContrastSaliencyEngine::default().compute(&image).unwrap();
        assert_eq!((field.width(), field.height()), (13, 7));
        assert_eq!(field.values().len(), 13 * 7);
    }
}
