//! Image loading types

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::RgbaImage;
use rand::Rng;

use crate::analysis_pipeline::common::error::{AnalysisError, Result};

/// Decoded RGBA pixels, row-major, 8 bits per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub const CHANNELS: usize = 4;

    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(Self::CHANNELS))
            .ok_or(AnalysisError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(AnalysisError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    /// A buffer where every pixel has the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self> {
        let pixels = width
            .checked_mul(height)
            .filter(|n| n.checked_mul(Self::CHANNELS).is_some())
            .ok_or(AnalysisError::InvalidDimensions(width, height))?;
        Self::new(width, height, rgba.repeat(pixels))
    }

    pub fn from_rgba_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            data: image.into_raw(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(Self::CHANNELS)
    }
}

/// Raster formats accepted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatKind {
    Png,
    Jpeg,
}

impl ImageFormatKind {
    /// Sniffs the magic bytes. Anything other than PNG or JPEG is rejected.
    pub fn detect(data: &[u8]) -> Result<Self> {
        match image::guess_format(data) {
            Ok(image::ImageFormat::Png) => Ok(ImageFormatKind::Png),
            Ok(image::ImageFormat::Jpeg) => Ok(ImageFormatKind::Jpeg),
            Ok(other) => Err(AnalysisError::UnsupportedFormat(format!("{:?}", other))),
            Err(_) => Err(AnalysisError::UnsupportedFormat(
                "unrecognized image signature".to_string(),
            )),
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageFormatKind::Png => "image/png",
            ImageFormatKind::Jpeg => "image/jpeg",
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            ImageFormatKind::Png => image::ImageFormat::Png,
            ImageFormatKind::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Where an image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Encoded bytes already in memory (an upload).
    Bytes { data: Vec<u8>, mime: Option<String> },
    /// A file on the local filesystem.
    Path(PathBuf),
    /// An `http(s)://` URL or a `data:` URL.
    Url(String),
}

impl ImageSource {
    pub fn bytes(data: Vec<u8>) -> Self {
        ImageSource::Bytes { data, mime: None }
    }

    /// Displayable reference to the original image.
    ///
    /// In-memory bytes become a `data:` URL so the reference stays usable
    /// after the request is gone.
    pub fn reference(&self) -> String {
        match self {
            ImageSource::Bytes { data, mime } => {
                let mime = mime
                    .clone()
                    .or_else(|| ImageFormatKind::detect(data).ok().map(|k| k.mime().to_string()))
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                data_url(&mime, data)
            }
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Url(url) => url.clone(),
        }
    }
}

/// One image of a batch, identified for joining results.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub id: String,
    pub source: ImageSource,
}

impl ImageInput {
    pub fn new(source: ImageSource) -> Self {
        Self {
            id: generate_image_id(&mut rand::thread_rng()),
            source,
        }
    }

    pub fn with_id(id: impl Into<String>, source: ImageSource) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `img_<unix millis>_<9 base36 chars>`
pub fn generate_image_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix: String = (0..9)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("img_{}_{}", millis, suffix)
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Splits a base64 `data:` URL into its mime type and decoded payload.
pub fn parse_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| AnalysisError::Decode("not a data URL".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| AnalysisError::Decode("data URL has no payload".to_string()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| AnalysisError::Decode("only base64 data URLs are supported".to_string()))?;
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| AnalysisError::Decode(format!("invalid base64 payload: {}", e)))?;
    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pixel_buffer_rejects_wrong_length() {
        let result = PixelBuffer::new(2, 2, vec![0u8; 15]);
        assert!(matches!(result, Err(AnalysisError::InvalidDimensions(2, 2))));
        assert!(PixelBuffer::new(2, 2, vec![0u8; 16]).is_ok());
    }

    #[test]
    fn test_filled_rejects_overflowing_dimensions() {
        let result = PixelBuffer::filled(usize::MAX, 2, [1, 2, 3, 4]);
        assert!(matches!(result, Err(AnalysisError::InvalidDimensions(_, 2))));

        let buffer = PixelBuffer::filled(3, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.pixel(2, 1), [1, 2, 3, 4]);
        assert_eq!(buffer.data().len(), 24);
    }

    #[test]
    fn test_pixel_lookup_is_row_major() {
        let mut data = vec![0u8; 3 * 2 * 4];
        let i = (1 * 3 + 2) * 4;
        data[i..i + 4].copy_from_slice(&[9, 8, 7, 6]);
        let buffer = PixelBuffer::new(3, 2, data).unwrap();
        assert_eq!(buffer.pixel(2, 1), [9, 8, 7, 6]);
        assert_eq!(buffer.pixels().count(), 6);
    }

    #[test]
    fn test_detect_rejects_gif() {
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";
        assert!(matches!(
            ImageFormatKind::detect(gif),
            Err(AnalysisError::UnsupportedFormat(_))
        ));
        assert_eq!(
            ImageFormatKind::detect(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap(),
            ImageFormatKind::Png
        );
        assert_eq!(
            ImageFormatKind::detect(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(),
            ImageFormatKind::Jpeg
        );
    }

    #[test]
    fn test_data_url_round_trip() {
        let url = data_url("image/png", &[1, 2, 3]);
        assert!(url.starts_with("data:image/png;base64,"));
        let (mime, bytes) = parse_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![1, 2, 3]);
        assert!(parse_data_url("https://example.com/a.png").is_err());
    }

    #[test]
    fn test_generated_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_image_id(&mut rng);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "img");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_path_and_url_references_pass_through() {
        assert_eq!(ImageSource::Url("https://cdn/x.jpg".into()).reference(), "https://cdn/x.jpg");
        assert_eq!(ImageSource::Path(PathBuf::from("box.png")).reference(), "box.png");
    }
}
