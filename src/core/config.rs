//! Configuration for the analysis pipeline.

use crate::core::errors::ScanError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default model input height.
pub const DEFAULT_INPUT_HEIGHT: u32 = 224;
/// Default model input width.
pub const DEFAULT_INPUT_WIDTH: u32 = 224;
/// Default upper bound on a single classification attempt.
pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the classification engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to an ONNX classification model.
    ///
    /// When absent, or when loading fails, the pipeline runs in degraded mode
    /// using the simulated classifier.
    pub model_path: Option<PathBuf>,

    /// Seed for the simulated classifier.
    ///
    /// Defaults to an entropy-derived seed; fix it for reproducible results.
    pub fallback_seed: Option<u64>,

    /// Number of threads used to parallelize execution within ONNX nodes.
    pub intra_threads: Option<usize>,
}

/// Configuration for the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Model input height in pixels.
    #[serde(default = "default_input_height")]
    pub input_height: u32,

    /// Model input width in pixels.
    #[serde(default = "default_input_width")]
    pub input_width: u32,

    /// Upper bound on a single classification attempt.
    ///
    /// Exceeding it fails the run with a timeout rather than hanging.
    #[serde(default = "default_classify_timeout")]
    pub classify_timeout: Duration,
}

fn default_input_height() -> u32 {
    DEFAULT_INPUT_HEIGHT
}

fn default_input_width() -> u32 {
    DEFAULT_INPUT_WIDTH
}

fn default_classify_timeout() -> Duration {
    DEFAULT_CLASSIFY_TIMEOUT
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            input_height: DEFAULT_INPUT_HEIGHT,
            input_width: DEFAULT_INPUT_WIDTH,
            classify_timeout: DEFAULT_CLASSIFY_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.input_height == 0 || self.input_width == 0 {
            return Err(ScanError::Config {
                message: format!(
                    "input shape must be positive, got {}x{}",
                    self.input_width, self.input_height
                ),
            });
        }
        if self.classify_timeout.is_zero() {
            return Err(ScanError::Config {
                message: "classify_timeout must be greater than zero".to_string(),
            });
        }
        if let Some(threads) = self.engine.intra_threads {
            if threads == 0 {
                return Err(ScanError::Config {
                    message: "intra_threads must be greater than zero when set".to_string(),
                });
            }
        }
        Ok(())
    }
}
