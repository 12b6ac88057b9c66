use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, RgbaImage};
use tracing::{debug, warn};

use crate::analysis_pipeline::common::error::{AnalysisError, Result};
use crate::analysis_pipeline::loader::types::PixelBuffer;
use crate::analysis_pipeline::render::colormap::heat_color;
use crate::analysis_pipeline::render::types::{HeatmapArtifact, HeatmapOrigin};
use crate::analysis_pipeline::saliency::types::SaliencyField;

/// Peak heat opacity on the saliency-engine path.
pub const SALIENCY_PEAK_ALPHA: u8 = 180;
/// Peak heat opacity on the geometric fallback path.
pub const FALLBACK_PEAK_ALPHA: u8 = 128;
pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.7;
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// JPEG cannot encode beyond 16-bit dimensions.
const MAX_SURFACE_DIMENSION: usize = u16::MAX as usize;

/// Colors a saliency field and composites the original image over it.
///
/// The heat layer is painted on a transparent surface, the original is drawn
/// on top with source-over at `overlay_opacity`, and the result is flattened
/// onto black before JPEG encoding.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    origin: HeatmapOrigin,
    peak_alpha: u8,
    overlay_opacity: f32,
    jpeg_quality: u8,
}

impl HeatmapRenderer {
    pub fn new(origin: HeatmapOrigin, peak_alpha: u8) -> Self {
        Self {
            origin,
            peak_alpha,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn saliency() -> Self {
        Self::new(HeatmapOrigin::Saliency, SALIENCY_PEAK_ALPHA)
    }

    pub fn fallback() -> Self {
        Self::new(HeatmapOrigin::Fallback, FALLBACK_PEAK_ALPHA)
    }

    pub fn with_peak_alpha(mut self, peak_alpha: u8) -> Self {
        self.peak_alpha = peak_alpha;
        self
    }

    pub fn with_overlay_opacity(mut self, opacity: f32) -> Self {
        self.overlay_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn peak_alpha(&self) -> u8 {
        self.peak_alpha
    }

    pub fn overlay_opacity(&self) -> f32 {
        self.overlay_opacity
    }

    fn check_surface(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::Render(format!(
                "cannot allocate a {}x{} surface",
                width, height
            )));
        }
        if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
            return Err(AnalysisError::Render(format!(
                "surface {}x{} exceeds {} pixels per side",
                width, height, MAX_SURFACE_DIMENSION
            )));
        }
        Ok(())
    }

    /// The colored heat layer alone, alpha included.
    pub fn paint(&self, field: &SaliencyField) -> Result<RgbaImage> {
        let (width, height) = (field.width(), field.height());
        self.check_surface(width, height)?;

        let mut layer = RgbaImage::new(width as u32, height as u32);
        for (pixel, &value) in layer.pixels_mut().zip(field.values()) {
            pixel.0 = heat_color(value, self.peak_alpha);
        }
        Ok(layer)
    }

    /// Heat layer with the overlay drawn on top, flattened to RGB.
    ///
    /// An overlay whose size differs from the field is treated as unavailable.
    pub fn composite(&self, field: &SaliencyField, overlay: Option<&PixelBuffer>) -> Result<RgbImage> {
        let layer = self.paint(field)?;

        let overlay = match overlay {
            Some(o) if o.width() == field.width() && o.height() == field.height() => Some(o),
            Some(o) => {
                warn!(
                    "Overlay is {}x{} but field is {}x{}, returning heatmap only",
                    o.width(),
                    o.height(),
                    field.width(),
                    field.height()
                );
                None
            }
            None => {
                warn!("Overlay source unavailable, returning heatmap only");
                None
            }
        };

        let mut out = RgbImage::new(layer.width(), layer.height());
        for (i, (dst, heat)) in out.pixels_mut().zip(layer.pixels()).enumerate() {
            let heat_alpha = heat.0[3] as f32 / 255.0;
            let (src, src_alpha) = match overlay {
                Some(o) => {
                    let p = &o.data()[i * PixelBuffer::CHANNELS..(i + 1) * PixelBuffer::CHANNELS];
                    ([p[0], p[1], p[2]], self.overlay_opacity * p[3] as f32 / 255.0)
                }
                None => ([0, 0, 0], 0.0),
            };

            // Source-over onto the heat layer, then onto black.
            let blend = |s: u8, h: u8| -> u8 {
                let v = s as f32 * src_alpha + h as f32 * heat_alpha * (1.0 - src_alpha);
                v.round().clamp(0.0, 255.0) as u8
            };
            *dst = Rgb([
                blend(src[0], heat.0[0]),
                blend(src[1], heat.0[1]),
                blend(src[2], heat.0[2]),
            ]);
        }
        Ok(out)
    }

    pub fn render(&self, field: &SaliencyField, overlay: Option<&PixelBuffer>) -> Result<HeatmapArtifact> {
        let composited = self.composite(field, overlay)?;
        let bytes = self.encode_jpeg(&composited)?;
        debug!(
            "Rendered {:?} heatmap {}x{}, {} bytes",
            self.origin,
            composited.width(),
            composited.height(),
            bytes.len()
        );
        Ok(HeatmapArtifact::jpeg(self.origin, bytes))
    }

    fn encode_jpeg(&self, image: &RgbImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| AnalysisError::Render(e.to_string()))?;
        Ok(buffer)
    }
}
