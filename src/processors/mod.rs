//! Image processing steps of the pipeline: decoding submitted bytes and
//! turning decoded images into fixed-shape input tensors.

pub mod decode;
pub mod normalization;
pub mod preprocess;

pub use decode::{decode, ImageAsset};
pub use normalization::Normalizer;
pub use preprocess::Preprocessor;
