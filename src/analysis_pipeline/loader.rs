//! Image loading module
//!
//! Resolves an image reference (bytes, file, URL) and decodes it into a
//! [`PixelBuffer`]. Only PNG and JPEG are accepted.

mod reader;
mod standard_loader;
pub mod types;

pub use reader::ImageLoader;
pub use standard_loader::StandardImageLoader;
pub use types::{ImageFormatKind, ImageInput, ImageSource, PixelBuffer};
