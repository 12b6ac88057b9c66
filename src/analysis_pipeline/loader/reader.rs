use crate::analysis_pipeline::common::error::Result;
use crate::analysis_pipeline::loader::types::{ImageSource, PixelBuffer};

#[allow(async_fn_in_trait)]
pub trait ImageLoader {
    async fn load(&self, source: &ImageSource) -> Result<PixelBuffer>;
}
