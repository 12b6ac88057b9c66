use crate::analysis_pipeline::common::error::Result;
use crate::analysis_pipeline::loader::types::PixelBuffer;
use crate::analysis_pipeline::saliency::types::SaliencyField;

pub trait SaliencyEngine {
    fn compute(&self, image: &PixelBuffer) -> Result<SaliencyField>;
}
