//! The pipeline state machine's states.

use crate::core::AnalysisFailure;
use crate::domain::AnalysisResult;

/// Current state of the analysis pipeline.
///
/// Exactly one state holds at any time. `Ready` and `Failed` terminate a run
/// but accept a new submission, restarting the cycle; a submission while any
/// other non-`Idle` state holds is rejected as busy.
///
/// ```text
/// Idle --submit--> AwaitingEngineReadiness --> Preprocessing --> Classifying
///   Classifying --ok--> Ready          Preprocessing/Classifying --err--> Failed
///   Ready/Failed --submit--> AwaitingEngineReadiness (previous result discarded)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// No submission has been made yet.
    Idle,
    /// A submission was accepted; waiting on the engine.
    AwaitingEngineReadiness,
    /// Decoding and preprocessing the submitted image.
    Preprocessing,
    /// Running classification.
    Classifying,
    /// The run completed; holds the assembled result.
    Ready(AnalysisResult),
    /// The run failed; holds the failure kind and message.
    Failed(AnalysisFailure),
}

impl PipelineState {
    /// Whether a new submission is accepted in this state.
    pub fn accepts_submission(&self) -> bool {
        matches!(
            self,
            PipelineState::Idle | PipelineState::Ready(_) | PipelineState::Failed(_)
        )
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::AwaitingEngineReadiness => "awaiting-engine",
            PipelineState::Preprocessing => "preprocessing",
            PipelineState::Classifying => "classifying",
            PipelineState::Ready(_) => "ready",
            PipelineState::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FailureKind;

    #[test]
    fn test_submission_acceptance() {
        assert!(PipelineState::Idle.accepts_submission());
        assert!(PipelineState::Failed(AnalysisFailure {
            kind: FailureKind::Decode,
            message: "bad input".into(),
        })
        .accepts_submission());
        assert!(!PipelineState::AwaitingEngineReadiness.accepts_submission());
        assert!(!PipelineState::Preprocessing.accepts_submission());
        assert!(!PipelineState::Classifying.accepts_submission());
    }
}
