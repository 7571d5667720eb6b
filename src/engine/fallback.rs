//! Simulated classifier used when no trained model is available.

use crate::domain::{Classification, TumorClass};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Confidence range the simulated classifier reports, in percent.
pub const SIMULATED_CONFIDENCE_RANGE: (f32, f32) = (85.0, 95.0);

/// Pseudo-random classifier over the enumerated label set.
///
/// Always available; results are non-authoritative and are flagged as
/// degraded downstream. With a fixed seed the label/confidence sequence is
/// reproducible.
#[derive(Debug)]
pub struct SimulatedClassifier {
    rng: Mutex<StdRng>,
}

impl SimulatedClassifier {
    /// Creates a classifier seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a classifier with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Picks a label uniformly from the enumerated set with a confidence
    /// drawn uniformly from [`SIMULATED_CONFIDENCE_RANGE`].
    pub fn classify(&self) -> Classification {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let class_id = rng.random_range(0..TumorClass::ALL.len());
        let (lo, hi) = SIMULATED_CONFIDENCE_RANGE;
        let confidence = rng.random_range(lo..=hi);
        let class = TumorClass::ALL[class_id];
        Classification::new(class_id, class.as_str(), confidence)
    }
}

impl Default for SimulatedClassifier {
    fn default() -> Self {
        Self::new()
    }
}
