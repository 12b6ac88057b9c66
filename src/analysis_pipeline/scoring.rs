//! Packaging scoring module
//!
//! The remote vision-scoring adapter, the schema its responses are checked
//! against, and the synthesized scores used when it is unavailable.

mod config;
pub mod fallback_scores;
pub mod schema;
mod scorer;
pub mod types;
mod vision_client;

pub use config::ScoringConfig;
pub use fallback_scores::{FALLBACK_NARRATIVE, suggestion_count, synthesize_scores, synthesize_suggestions};
pub use schema::PackagingAnalysisSchema;
pub use scorer::ScoringAdapter;
pub use types::{ScoreSet, overall_score, round1};
pub use vision_client::VisionScoringClient;
