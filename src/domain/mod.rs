//! Domain types: the enumerated label set, static category metadata, and the
//! assembled analysis result.

pub mod labels;
pub mod metadata;
pub mod result;

pub use labels::TumorClass;
pub use metadata::{metadata_for, metadata_for_label, CategoryMetadata};
pub use result::{AnalysisResult, Classification};
