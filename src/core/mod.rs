//! Core types of the analysis pipeline: configuration, errors, and tensor
//! aliases shared by the processors, engine, and pipeline modules.

pub mod config;
pub mod errors;
pub mod tensor;

pub use config::{
    EngineConfig, PipelineConfig, DEFAULT_CLASSIFY_TIMEOUT, DEFAULT_INPUT_HEIGHT,
    DEFAULT_INPUT_WIDTH,
};
pub use errors::{AnalysisFailure, FailureKind, ScanError};
pub use tensor::{Tensor1D, Tensor4D};
