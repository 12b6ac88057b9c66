//! Placeholder scores for when remote scoring is unavailable.
//!
//! A single random score in `[4.0, 9.5]` stands in for every sub-score, and
//! the weaker that score the more generic suggestions are attached.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::analysis_pipeline::scoring::types::{ScoreSet, round1};

pub const FALLBACK_SCORE_MIN: f64 = 4.0;
pub const FALLBACK_SCORE_MAX: f64 = 9.5;
pub const MIN_SUGGESTIONS: usize = 2;
pub const MAX_SUGGESTIONS: usize = 5;

pub const FALLBACK_NARRATIVE: &str = "Simulated analysis due to API error.";

pub const SUGGESTION_POOL: [&str; 10] = [
    "Increase contrast between product name and background.",
    "Use a larger font for key claims.",
    "Position the logo in the top third for maximum noticeability.",
    "Reduce visual clutter to focus attention on core message.",
    "Consider higher-saturation colors for stronger shelf pop.",
    "Add negative space around hero elements.",
    "Try a distinctive die-cut or silhouette.",
    "Apply the rule of thirds to layout.",
    "Add texture contrast to make elements pop.",
    "Re-evaluate hierarchy based on consumer priorities.",
];

/// `clamp(round(10 - score), 2, 5)`
pub fn suggestion_count(score: f64) -> usize {
    let n = (10.0 - score).round();
    n.clamp(MIN_SUGGESTIONS as f64, MAX_SUGGESTIONS as f64) as usize
}

pub fn synthesize_suggestions<R: Rng + ?Sized>(score: f64, rng: &mut R) -> Vec<String> {
    let mut pool = SUGGESTION_POOL;
    pool.shuffle(rng);
    pool.iter()
        .take(suggestion_count(score))
        .map(|s| s.to_string())
        .collect()
}

pub fn synthesize_scores<R: Rng + ?Sized>(rng: &mut R) -> ScoreSet {
    let span = FALLBACK_SCORE_MAX - FALLBACK_SCORE_MIN;
    let score = round1(FALLBACK_SCORE_MIN + rng.gen_range(0.0..1.0) * span);
    let suggestions = synthesize_suggestions(score, rng);
    ScoreSet::uniform(score, suggestions, FALLBACK_NARRATIVE)
}
