//! Error types for the analysis pipeline.
//!
//! [`ScanError`] is the crate-wide error enum; every fallible operation in the
//! pipeline returns it. [`FailureKind`] and [`AnalysisFailure`] are the
//! cloneable projections carried by the `Failed` pipeline state so that
//! presentation code can distinguish "unsupported image" from "analysis
//! failed" without holding non-cloneable error sources.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running the analysis pipeline.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The submitted bytes could not be decoded as a raster image.
    #[error("image decode")]
    Decode(#[source] image::ImageError),

    /// The submitted payload was empty.
    #[error("empty image payload")]
    EmptyInput,

    /// The declared MIME type is not a supported raster image type.
    #[error("unsupported image type '{mime}'")]
    UnsupportedMime {
        /// The MIME type declared on submission.
        mime: String,
    },

    /// Preprocessing could not turn the decoded image into a tensor.
    #[error("preprocessing failed: {context}")]
    Preprocess {
        /// Description of what went wrong.
        context: String,
    },

    /// The model-backed engine could not be initialized.
    ///
    /// This is absorbed by falling back to the simulated classifier and is
    /// never surfaced through the pipeline state.
    #[error("engine unavailable: model load failed for '{model_path}': {reason}")]
    EngineUnavailable {
        /// Path of the model artifact that failed to load.
        model_path: String,
        /// Short reason string.
        reason: String,
        /// Underlying source error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A classification attempt raised an internal fault.
    #[error("inference failed in engine '{engine}': {context}")]
    Inference {
        /// Name of the engine variant that failed.
        engine: String,
        /// Description of the fault.
        context: String,
        /// Underlying source error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Classification exceeded the configured upper bound.
    #[error("classification timed out after {timeout:?}")]
    Timeout {
        /// The configured timeout that was exceeded.
        timeout: Duration,
    },

    /// A submission arrived while a run was already in flight.
    #[error("a submission is already in flight")]
    PipelineBusy,

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor shape operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// Invalid configuration.
    #[error("configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

impl From<image::ImageError> for ScanError {
    fn from(error: image::ImageError) -> Self {
        Self::Decode(error)
    }
}

impl ScanError {
    /// Creates a preprocessing error with context.
    pub fn preprocess(context: impl Into<String>) -> Self {
        Self::Preprocess {
            context: context.into(),
        }
    }

    /// Creates an inference error with engine name and context.
    pub fn inference(
        engine: impl Into<String>,
        context: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Inference {
            engine: engine.into(),
            context: context.into(),
            source,
        }
    }

    /// Maps this error onto the kind carried by the `Failed` pipeline state.
    ///
    /// Returns `None` for errors that never reach that state (busy rejections,
    /// absorbed engine-availability errors, configuration errors).
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Decode(_) | Self::EmptyInput | Self::UnsupportedMime { .. } => {
                Some(FailureKind::Decode)
            }
            Self::Preprocess { .. } | Self::Tensor(_) => Some(FailureKind::Preprocess),
            Self::Inference { .. } | Self::Session(_) => Some(FailureKind::Inference),
            Self::Timeout { .. } => Some(FailureKind::Timeout),
            Self::EngineUnavailable { .. } | Self::PipelineBusy | Self::Config { .. } => None,
        }
    }
}

/// Kind of failure that terminated a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The input bytes were not a supported raster image.
    Decode,
    /// The decoded image could not be preprocessed.
    Preprocess,
    /// Classification raised an internal fault (after one retry).
    Inference,
    /// Classification exceeded the configured upper bound.
    Timeout,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Decode => write!(f, "decode"),
            FailureKind::Preprocess => write!(f, "preprocess"),
            FailureKind::Inference => write!(f, "inference"),
            FailureKind::Timeout => write!(f, "timeout"),
        }
    }
}

/// Cloneable description of a failed run, carried by the `Failed` state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisFailure {
    /// The failure kind.
    pub kind: FailureKind,
    /// Human-readable message rendered from the originating [`ScanError`].
    pub message: String,
}

impl AnalysisFailure {
    /// Builds a failure record from a pipeline error.
    ///
    /// Callers must only pass errors that terminate a run; anything else is
    /// recorded as an inference fault so the state machine still resolves.
    pub fn from_error(error: &ScanError) -> Self {
        Self {
            kind: error.failure_kind().unwrap_or(FailureKind::Inference),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.kind, self.message)
    }
}
