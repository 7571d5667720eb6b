//! Classification engine: one facade over the model-backed and simulated
//! classifier variants.
//!
//! The variant is selected once at initialization and fixed for the engine's
//! lifetime. A missing or unloadable model is absorbed by falling back to the
//! simulated classifier; the pipeline never hard-fails for lack of a model.

pub mod fallback;
pub mod model;

pub use fallback::{SimulatedClassifier, SIMULATED_CONFIDENCE_RANGE};
pub use model::ModelClassifier;

use crate::core::{EngineConfig, ScanError, Tensor4D};
use crate::domain::Classification;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
enum Backend {
    Model(Arc<ModelClassifier>),
    Simulated(SimulatedClassifier),
    #[cfg(test)]
    Scripted(scripted::ScriptedClassifier),
}

/// The classification engine used by the pipeline.
#[derive(Debug)]
pub struct ClassificationEngine {
    backend: Backend,
}

impl ClassificationEngine {
    /// Initializes the engine from configuration.
    ///
    /// Tries the model-backed variant when a model path is configured; any
    /// load failure is logged and absorbed by the simulated classifier.
    /// Initialization itself never fails.
    pub fn initialize(config: &EngineConfig) -> Self {
        let backend = match &config.model_path {
            Some(path) => match ModelClassifier::load(path, config.intra_threads) {
                Ok(model) => Backend::Model(Arc::new(model)),
                Err(error) => {
                    warn!(%error, "model unavailable, running in degraded mode");
                    Backend::Simulated(Self::build_simulated(config))
                }
            },
            None => {
                info!("no model configured, running in degraded mode");
                Backend::Simulated(Self::build_simulated(config))
            }
        };
        Self { backend }
    }

    fn build_simulated(config: &EngineConfig) -> SimulatedClassifier {
        match config.fallback_seed {
            Some(seed) => SimulatedClassifier::with_seed(seed),
            None => SimulatedClassifier::new(),
        }
    }

    /// Builds an engine that replays a fixed reply sequence, for exercising
    /// the pipeline's fault and timeout handling.
    #[cfg(test)]
    pub(crate) fn scripted(replies: impl IntoIterator<Item = scripted::Reply>) -> Self {
        Self {
            backend: Backend::Scripted(scripted::ScriptedClassifier::new(replies)),
        }
    }

    /// True when results come from the simulated classifier rather than a
    /// trained model.
    pub fn is_degraded(&self) -> bool {
        matches!(self.backend, Backend::Simulated(_))
    }

    /// Name of the active variant, for logging.
    pub fn variant_name(&self) -> &str {
        match &self.backend {
            Backend::Model(model) => model.name(),
            Backend::Simulated(_) => "simulated",
            #[cfg(test)]
            Backend::Scripted(_) => "scripted",
        }
    }

    /// Classifies a preprocessed tensor.
    ///
    /// Model inference runs on a blocking thread; the simulated variant
    /// answers inline.
    pub async fn classify(&self, tensor: &Tensor4D) -> Result<Classification, ScanError> {
        match &self.backend {
            Backend::Model(model) => {
                let model = Arc::clone(model);
                let tensor = tensor.clone();
                tokio::task::spawn_blocking(move || model.classify(&tensor))
                    .await
                    .map_err(|e| {
                        ScanError::inference("model", "inference task panicked", Some(Box::new(e)))
                    })?
            }
            Backend::Simulated(sim) => Ok(sim.classify()),
            #[cfg(test)]
            Backend::Scripted(script) => script.classify().await,
        }
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    //! Replay classifier for exercising fault and timeout paths that the
    //! real variants cannot produce on demand.

    use crate::core::ScanError;
    use crate::domain::Classification;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// One reply, consumed in submission order.
    #[derive(Debug)]
    pub(crate) enum Reply {
        /// Succeed with this classification.
        Classification(Classification),
        /// Fail with an internal inference fault.
        Fault(&'static str),
        /// Suspend for the given duration before failing.
        Stall(Duration),
    }

    #[derive(Debug)]
    pub(crate) struct ScriptedClassifier {
        replies: Mutex<VecDeque<Reply>>,
    }

    impl ScriptedClassifier {
        pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
            }
        }

        pub(crate) async fn classify(&self) -> Result<Classification, ScanError> {
            let reply = self
                .replies
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front()
                .expect("reply sequence exhausted");
            match reply {
                Reply::Classification(classification) => Ok(classification),
                Reply::Fault(context) => Err(ScanError::inference("scripted", context, None)),
                Reply::Stall(delay) => {
                    tokio::time::sleep(delay).await;
                    Err(ScanError::inference(
                        "scripted",
                        "stalled past its deadline",
                        None,
                    ))
                }
            }
        }
    }
}
