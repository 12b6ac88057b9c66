//! Saliency computation module
//!
//! Turns decoded pixels into a per-pixel attention field in `[0,1]`.

mod contrast_engine;
mod engine;
pub mod types;

pub use contrast_engine::ContrastSaliencyEngine;
pub use engine::SaliencyEngine;
pub use types::SaliencyField;
