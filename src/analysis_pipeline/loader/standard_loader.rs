//! Image loader backed by the `image` crate.
//!
//! Bytes are resolved asynchronously (file read, HTTP fetch or inline data
//! URL), the format is checked against the PNG/JPEG allow-list, and the
//! decode itself runs on tokio's blocking pool. Decoder state lives inside
//! the blocking closure and is dropped there whether decoding succeeds or not.

use tracing::debug;

use crate::analysis_pipeline::common::error::{AnalysisError, Result};
use crate::analysis_pipeline::loader::reader::ImageLoader;
use crate::analysis_pipeline::loader::types::{
    ImageFormatKind, ImageSource, PixelBuffer, parse_data_url,
};

pub struct StandardImageLoader {
    http: reqwest::Client,
}

impl Default for StandardImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardImageLoader {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn resolve_bytes(&self, source: &ImageSource) -> Result<Vec<u8>> {
        match source {
            ImageSource::Bytes { data, .. } => Ok(data.clone()),
            ImageSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| AnalysisError::Decode(format!("{}: {}", path.display(), e))),
            ImageSource::Url(url) if url.starts_with("data:") => {
                parse_data_url(url).map(|(_, bytes)| bytes)
            }
            ImageSource::Url(url) if url.starts_with("http://") || url.starts_with("https://") => {
                self.fetch(url).await
            }
            ImageSource::Url(url) => Err(AnalysisError::Decode(format!(
                "unsupported image reference: {}",
                url
            ))),
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "Fetching image");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AnalysisError::Decode(format!("{}: {}", url, e)))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AnalysisError::Decode(format!("{}: {}", url, e)))?;
        Ok(bytes.to_vec())
    }
}

/// Decodes PNG or JPEG bytes into RGBA pixels at the image's natural size.
pub fn decode_bytes(data: &[u8]) -> Result<PixelBuffer> {
    let kind = ImageFormatKind::detect(data)?;
    debug!("Decoding {:?} image, {} bytes", kind, data.len());

    let decoded = image::load_from_memory_with_format(data, kind.image_format())
        .map_err(|e| AnalysisError::Decode(e.to_string()))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(AnalysisError::InvalidDimensions(
            width as usize,
            height as usize,
        ));
    }

    debug!("Decoded image: {}x{}", width, height);
    Ok(PixelBuffer::from_rgba_image(decoded))
}

impl ImageLoader for StandardImageLoader {
    async fn load(&self, source: &ImageSource) -> Result<PixelBuffer> {
        let bytes = self.resolve_bytes(source).await?;
        // Reject disallowed formats before paying for a blocking task.
        ImageFormatKind::detect(&bytes)?;

        tokio::task::spawn_blocking(move || decode_bytes(&bytes))
            .await
            .map_err(|e| AnalysisError::Decode(format!("decode task failed: {}", e)))?
    }
}
