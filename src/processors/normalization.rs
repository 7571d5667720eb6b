//! Pixel normalization into the float range the classifier expects.

use crate::core::{ScanError, Tensor4D};
use image::RgbImage;

/// Normalizes RGB pixel buffers into CHW float tensors.
///
/// Precomputes per-channel `alpha = scale / std` and `beta = -mean / std` so
/// each sample is a single multiply-add: `value * alpha + beta`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    alpha: [f32; 3],
    beta: [f32; 3],
}

impl Normalizer {
    /// Creates a normalizer from scale, per-channel mean, and per-channel std.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if scale is not positive or any std is
    /// not positive.
    pub fn new(scale: f32, mean: [f32; 3], std: [f32; 3]) -> Result<Self, ScanError> {
        if scale <= 0.0 {
            return Err(ScanError::Config {
                message: format!("normalization scale must be greater than 0, got {scale}"),
            });
        }
        for (i, &s) in std.iter().enumerate() {
            if s <= 0.0 {
                return Err(ScanError::Config {
                    message: format!(
                        "standard deviation at channel {i} must be greater than 0, got {s}"
                    ),
                });
            }
        }

        let mut alpha = [0.0f32; 3];
        let mut beta = [0.0f32; 3];
        for c in 0..3 {
            alpha[c] = scale / std[c];
            beta[c] = -mean[c] / std[c];
        }
        Ok(Self { alpha, beta })
    }

    /// Unit normalizer: samples scaled into [0, 1] (scale 1/255, zero mean,
    /// unit std). This is the convention the classification engine is
    /// documented to expect.
    pub fn unit() -> Self {
        // Constructor cannot fail with these parameters.
        Self {
            alpha: [1.0 / 255.0; 3],
            beta: [0.0; 3],
        }
    }

    /// Normalizes a single image into a (1, 3, H, W) tensor.
    ///
    /// Deterministic: the same pixel buffer always yields the same tensor.
    pub fn normalize(&self, img: &RgbImage) -> Result<Tensor4D, ScanError> {
        let (width, height) = img.dimensions();
        let (w, h) = (width as usize, height as usize);

        let mut data = vec![0.0f32; 3 * h * w];
        for (x, y, pixel) in img.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            for c in 0..3 {
                data[c * h * w + y * w + x] = pixel[c] as f32 * self.alpha[c] + self.beta[c];
            }
        }

        Ok(Tensor4D::from_shape_vec((1, 3, h, w), data)?)
    }
}
