//! Common utilities module
//!
//! This module contains shared utilities used across the analysis pipeline.

pub mod error;
pub mod random;
pub mod timing;

pub use error::{AnalysisError, Result};
pub use random::{RngFactory, Track};
pub use timing::{StageTimings, Timer};
