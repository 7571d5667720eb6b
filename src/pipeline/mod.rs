//! The analysis pipeline: a single-run asynchronous state machine over
//! decode, preprocess, classify, and assemble.

pub mod controller;
pub mod state;

pub use controller::AnalysisPipeline;
pub use state::PipelineState;
