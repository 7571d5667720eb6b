//! The pipeline controller: one asynchronous analysis run per submission.

use crate::core::{AnalysisFailure, PipelineConfig, ScanError};
use crate::domain::AnalysisResult;
use crate::engine::ClassificationEngine;
use crate::pipeline::state::PipelineState;
use crate::processors::{decode, ImageAsset, Preprocessor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Orchestrates decode, preprocessing, classification, and result assembly
/// for one image at a time.
///
/// At most one run is in flight per pipeline instance; a submission received
/// mid-run is rejected with [`ScanError::PipelineBusy`] rather than queued, so
/// tensor buffers from concurrent uploads never interleave. The current
/// [`PipelineState`] is published through a watch channel for presentation
/// code.
#[derive(Debug)]
pub struct AnalysisPipeline {
    engine: Arc<ClassificationEngine>,
    preprocessor: Preprocessor,
    classify_timeout: Duration,
    state_tx: Arc<watch::Sender<PipelineState>>,
    in_flight: Arc<AtomicBool>,
}

impl AnalysisPipeline {
    /// Initializes the pipeline from configuration.
    ///
    /// Loads the classification model when one is configured; an unloadable
    /// model degrades the engine instead of failing initialization.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the config is invalid.
    pub async fn initialize(config: PipelineConfig) -> Result<Self, ScanError> {
        config.validate()?;

        let engine_config = config.engine.clone();
        // Model loading reads from disk; keep it off the async workers.
        let engine = tokio::task::spawn_blocking(move || {
            ClassificationEngine::initialize(&engine_config)
        })
        .await
        .map_err(|e| ScanError::inference("engine", "initialization task panicked", Some(Box::new(e))))?;

        info!(
            variant = engine.variant_name(),
            degraded = engine.is_degraded(),
            "analysis pipeline initialized"
        );

        let (state_tx, _) = watch::channel(PipelineState::Idle);
        Ok(Self {
            engine: Arc::new(engine),
            preprocessor: Preprocessor::new(config.input_width, config.input_height),
            classify_timeout: config.classify_timeout,
            state_tx: Arc::new(state_tx),
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Builds a pipeline around a pre-built engine, bypassing model loading.
    #[cfg(test)]
    pub(crate) fn with_engine(engine: ClassificationEngine, config: &PipelineConfig) -> Self {
        let (state_tx, _) = watch::channel(PipelineState::Idle);
        Self {
            engine: Arc::new(engine),
            preprocessor: Preprocessor::new(config.input_width, config.input_height),
            classify_timeout: config.classify_timeout,
            state_tx: Arc::new(state_tx),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current pipeline state.
    pub fn state(&self) -> PipelineState {
        self.state_tx.borrow().clone()
    }

    /// Subscribes to state changes.
    ///
    /// `Ready` and `Failed` persist until the next submission, so a
    /// subscriber that only polls terminal states observes every run's
    /// outcome.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state_tx.subscribe()
    }

    /// True when results come from the fallback classifier.
    pub fn is_degraded(&self) -> bool {
        self.engine.is_degraded()
    }

    /// Submits an image for analysis.
    ///
    /// Returns synchronously once the run is started; progress and the final
    /// result arrive through the state channel. A previous `Ready` result is
    /// discarded, not merged. Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::PipelineBusy`] while a run is in flight; the
    /// current state is left unchanged.
    pub fn submit(&self, asset: ImageAsset) -> Result<(), ScanError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ScanError::PipelineBusy);
        }

        debug!(bytes = asset.len(), mime = ?asset.mime(), "submission accepted");
        self.state_tx
            .send_replace(PipelineState::AwaitingEngineReadiness);

        let engine = Arc::clone(&self.engine);
        let preprocessor = self.preprocessor.clone();
        let classify_timeout = self.classify_timeout;
        let state_tx = Arc::clone(&self.state_tx);
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            let outcome =
                run_analysis(&engine, &preprocessor, classify_timeout, &state_tx, asset).await;

            let terminal = match outcome {
                Ok(result) => {
                    info!(
                        label = %result.label,
                        confidence = result.confidence,
                        degraded = result.degraded,
                        "analysis complete"
                    );
                    PipelineState::Ready(result)
                }
                Err(error) => {
                    warn!(%error, "analysis failed");
                    PipelineState::Failed(AnalysisFailure::from_error(&error))
                }
            };

            // Clear the busy flag before receivers are notified, so an
            // observer reacting to the terminal state can resubmit at once.
            state_tx.send_modify(|state| {
                in_flight.store(false, Ordering::Release);
                *state = terminal;
            });
        });

        Ok(())
    }
}

/// Executes one run: Decode -> Preprocess -> Classify -> Assemble, in strict
/// order; no step begins before its predecessor completed.
async fn run_analysis(
    engine: &ClassificationEngine,
    preprocessor: &Preprocessor,
    classify_timeout: Duration,
    state_tx: &watch::Sender<PipelineState>,
    asset: ImageAsset,
) -> Result<AnalysisResult, ScanError> {
    // The engine variant was fixed at initialization; a failed model load
    // already degraded it, so readiness resolves immediately either way.
    state_tx.send_replace(PipelineState::Preprocessing);

    let preprocessor = preprocessor.clone();
    let tensor = tokio::task::spawn_blocking(move || {
        let image = decode(asset)?;
        preprocessor.run(&image)
    })
    .await
    .map_err(|e| ScanError::inference("pipeline", "preprocessing task panicked", Some(Box::new(e))))??;

    state_tx.send_replace(PipelineState::Classifying);
    let classification = classify_with_retry(engine, &tensor, classify_timeout).await?;

    Ok(AnalysisResult::assemble(classification, engine.is_degraded()))
}

/// Runs classification with the configured upper bound, retrying an internal
/// inference fault at most once per submission.
async fn classify_with_retry(
    engine: &ClassificationEngine,
    tensor: &crate::core::Tensor4D,
    classify_timeout: Duration,
) -> Result<crate::domain::Classification, ScanError> {
    for attempt in 0..2 {
        let result = tokio::time::timeout(classify_timeout, engine.classify(tensor)).await;
        match result {
            Ok(Ok(classification)) => return Ok(classification),
            // Timeouts are not retried; the bound covers the whole wait.
            Err(_) => {
                return Err(ScanError::Timeout {
                    timeout: classify_timeout,
                })
            }
            Ok(Err(error)) if attempt == 0 => {
                warn!(%error, "inference fault, retrying once");
            }
            Ok(Err(error)) => return Err(error),
        }
    }
    unreachable!("classification loop returns within two attempts")
}
