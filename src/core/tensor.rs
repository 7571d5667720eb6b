//! Tensor type aliases used across the pipeline.

/// A 4-dimensional tensor (batch, channels, height, width).
pub type Tensor4D = ndarray::Array4<f32>;

/// A 1-dimensional tensor, used for per-class scores.
pub type Tensor1D = ndarray::Array1<f32>;
