//! ONNX-backed classifier.

use crate::core::{ScanError, Tensor4D};
use crate::domain::{Classification, TumorClass};
use crate::utils::{softmax, top1};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Classifier backed by a trained ONNX model.
///
/// Expects a single NCHW f32 input and a logit vector over the enumerated
/// label set as output. Softmax and top-1 selection happen on the host.
pub struct ModelClassifier {
    // ort sessions take &mut self to run.
    session: Mutex<Session>,
    model_name: String,
}

impl std::fmt::Debug for ModelClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClassifier")
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl ModelClassifier {
    /// Loads a model artifact from disk.
    ///
    /// # Errors
    ///
    /// Any failure is reported as [`ScanError::EngineUnavailable`] so callers
    /// can absorb it by falling back rather than failing the user flow.
    pub fn load(path: &Path, intra_threads: Option<usize>) -> Result<Self, ScanError> {
        let build = || -> Result<Session, ort::Error> {
            let mut builder = Session::builder()?;
            if let Some(threads) = intra_threads {
                builder = builder.with_intra_threads(threads)?;
            }
            builder.commit_from_file(path)
        };

        let session = build().map_err(|e| ScanError::EngineUnavailable {
            model_path: path.display().to_string(),
            reason: e.to_string(),
            source: Some(Box::new(e)),
        })?;

        let model_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        info!(model = %model_name, path = %path.display(), "loaded classification model");

        Ok(Self {
            session: Mutex::new(session),
            model_name,
        })
    }

    /// Name of the loaded model artifact.
    pub fn name(&self) -> &str {
        &self.model_name
    }

    /// Runs one forward pass and returns the top-1 classification.
    ///
    /// Blocking; the engine facade dispatches it to a blocking thread.
    pub fn classify(&self, tensor: &Tensor4D) -> Result<Classification, ScanError> {
        let input = Value::from_array(tensor.clone()).map_err(ScanError::Session)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ScanError::inference(&self.model_name, "session lock poisoned", None))?;
        let outputs = session.run(ort::inputs![input])?;

        let (_, logits) = outputs[0].try_extract_tensor::<f32>()?;
        if logits.is_empty() {
            return Err(ScanError::inference(
                &self.model_name,
                "model produced an empty output tensor",
                None,
            ));
        }

        let scores = softmax(logits);
        let (class_id, score) = top1(&scores).ok_or_else(|| {
            ScanError::inference(&self.model_name, "no finite score in model output", None)
        })?;

        let label = TumorClass::from_class_id(class_id)
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| format!("class-{class_id}"));

        Ok(Classification::new(class_id, label, score * 100.0))
    }
}
