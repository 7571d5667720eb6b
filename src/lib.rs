//! # neuroscan
//!
//! MRI tumor classification pipeline.
//!
//! The crate implements the analysis core of the NeuroScan application:
//! raw image bytes are decoded, resized and normalized into a fixed-shape
//! float tensor, classified by an ONNX model (or a deterministic fallback
//! when no model is available), and joined with static category metadata
//! into an [`AnalysisResult`]. A single-run state machine
//! ([`pipeline::AnalysisPipeline`]) coordinates the asynchronous steps and
//! publishes the current [`pipeline::PipelineState`] to presentation code.
//!
//! # Example
//!
//! ```no_run
//! use neuroscan::core::PipelineConfig;
//! use neuroscan::pipeline::{AnalysisPipeline, PipelineState};
//! use neuroscan::processors::ImageAsset;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = AnalysisPipeline::initialize(PipelineConfig::default()).await?;
//! let mut states = pipeline.subscribe();
//!
//! let bytes = std::fs::read("scan.png")?;
//! pipeline.submit(ImageAsset::new(bytes, Some("image/png".into())))?;
//!
//! loop {
//!     states.changed().await?;
//!     match &*states.borrow() {
//!         PipelineState::Ready(result) => {
//!             println!("{} ({:.1}% confidence)", result.display_name(), result.confidence);
//!             break;
//!         }
//!         PipelineState::Failed(failure) => {
//!             eprintln!("analysis failed: {failure}");
//!             break;
//!         }
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod engine;
pub mod pipeline;
pub mod processors;
pub mod utils;

pub use crate::core::{EngineConfig, PipelineConfig, ScanError};
pub use crate::domain::{AnalysisResult, CategoryMetadata, Classification, TumorClass};
pub use crate::engine::ClassificationEngine;
pub use crate::pipeline::{AnalysisPipeline, PipelineState};
pub use crate::processors::ImageAsset;
