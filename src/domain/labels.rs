//! The enumerated set of classification labels.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Enumerated tumor categories the classifier distinguishes.
///
/// Class ids follow the order of [`TumorClass::ALL`], matching the output
/// index order of the classification model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TumorClass {
    /// No tumor visible in the scan.
    NoTumor,
    /// Glioma.
    Glioma,
    /// Meningioma.
    Meningioma,
    /// Pituitary tumor.
    Pituitary,
}

impl TumorClass {
    /// All classes, in class-id order.
    pub const ALL: [TumorClass; 4] = [
        TumorClass::NoTumor,
        TumorClass::Glioma,
        TumorClass::Meningioma,
        TumorClass::Pituitary,
    ];

    /// Stable string identifier for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            TumorClass::NoTumor => "no-tumor",
            TumorClass::Glioma => "glioma",
            TumorClass::Meningioma => "meningioma",
            TumorClass::Pituitary => "pituitary",
        }
    }

    /// Numeric class id (index into the model's output vector).
    pub fn class_id(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// Looks up a class by its numeric id.
    pub fn from_class_id(id: usize) -> Option<TumorClass> {
        Self::ALL.get(id).copied()
    }
}

impl FromStr for TumorClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or(())
    }
}

impl std::fmt::Display for TumorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
