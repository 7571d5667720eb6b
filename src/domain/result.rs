//! Classification output and the assembled, presentable result.

use crate::domain::labels::TumorClass;
use crate::domain::metadata::{metadata_for_label, CategoryMetadata};

/// A single classification produced by an engine variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// The predicted class id.
    pub class_id: usize,
    /// The raw label string for the predicted class.
    pub label: String,
    /// Confidence score in [0, 100].
    pub confidence: f32,
}

impl Classification {
    /// Creates a new classification.
    pub fn new(class_id: usize, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            class_id,
            label: label.into(),
            confidence,
        }
    }
}

/// The final result of one pipeline run, ready for presentation.
///
/// Created once per successful run and superseded entirely by the next run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// The raw classification label.
    pub label: String,
    /// Confidence score in [0, 100].
    pub confidence: f32,
    /// True when the result came from the fallback classifier rather than a
    /// trained model (degraded mode).
    pub degraded: bool,
    /// The enumerated class, when the label belongs to the known set.
    pub class: Option<TumorClass>,
    /// Descriptive metadata; present iff the label is a known class.
    pub metadata: Option<&'static CategoryMetadata>,
}

impl AnalysisResult {
    /// Joins a classification with the static category table.
    ///
    /// Pure lookup. An out-of-enumeration label is not an error: it yields an
    /// absent metadata field and the display name "Unknown".
    pub fn assemble(classification: Classification, degraded: bool) -> Self {
        let class = classification.label.parse::<TumorClass>().ok();
        let metadata = metadata_for_label(&classification.label);
        Self {
            label: classification.label,
            confidence: classification.confidence,
            degraded,
            class,
            metadata,
        }
    }

    /// User-facing name for the classified category.
    pub fn display_name(&self) -> &str {
        self.metadata.map(|m| m.display_name).unwrap_or("Unknown")
    }

    /// Whether the scan was classified as showing a tumor.
    pub fn tumor_detected(&self) -> Option<bool> {
        self.class.map(|c| c != TumorClass::NoTumor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_known_label() {
        let result =
            AnalysisResult::assemble(Classification::new(2, "meningioma", 91.2), false);
        assert_eq!(result.class, Some(TumorClass::Meningioma));
        assert_eq!(result.display_name(), "Meningioma");
        assert!(result.metadata.is_some());
        assert_eq!(result.tumor_detected(), Some(true));
        assert!(!result.degraded);
    }

    #[test]
    fn test_assemble_unknown_label_is_not_an_error() {
        let result = AnalysisResult::assemble(Classification::new(7, "astrocytoma", 55.0), true);
        assert_eq!(result.class, None);
        assert!(result.metadata.is_none());
        assert_eq!(result.display_name(), "Unknown");
        assert_eq!(result.tumor_detected(), None);
        assert!(result.degraded);
    }

    #[test]
    fn test_no_tumor_label() {
        let result = AnalysisResult::assemble(Classification::new(0, "no-tumor", 97.0), false);
        assert_eq!(result.tumor_detected(), Some(false));
        assert_eq!(result.display_name(), "No Tumor Detected");
    }
}
