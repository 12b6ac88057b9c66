use crate::analysis_pipeline::common::error::Result;
use crate::analysis_pipeline::loader::types::ImageSource;
use crate::analysis_pipeline::scoring::types::ScoreSet;

#[allow(async_fn_in_trait)]
pub trait ScoringAdapter {
    async fn score(&self, image: &ImageSource) -> Result<ScoreSet>;
}
