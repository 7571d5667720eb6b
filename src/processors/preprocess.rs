//! Preprocessing: decoded pixel buffer to fixed-shape input tensor.

use crate::core::{ScanError, Tensor4D};
use crate::processors::normalization::Normalizer;
use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::debug;

/// Resizes and normalizes decoded images into the fixed shape the
/// classification engine expects: (1, 3, height, width), f32 in [0, 1].
#[derive(Debug, Clone)]
pub struct Preprocessor {
    width: u32,
    height: u32,
    normalizer: Normalizer,
}

impl Preprocessor {
    /// Creates a preprocessor with the given target shape and [0, 1]
    /// normalization.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            normalizer: Normalizer::unit(),
        }
    }

    /// Target (width, height).
    pub fn target_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Runs resize and normalization on a decoded image.
    ///
    /// Bilinear resampling; deterministic for a given pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Preprocess`] when the input has zero area.
    pub fn run(&self, img: &RgbImage) -> Result<Tensor4D, ScanError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ScanError::preprocess(format!(
                "input image has zero area ({width}x{height})"
            )));
        }

        debug!(
            from_width = width,
            from_height = height,
            to_width = self.width,
            to_height = self.height,
            "resizing image to model input shape"
        );

        let resized = if (width, height) == (self.width, self.height) {
            std::borrow::Cow::Borrowed(img)
        } else {
            std::borrow::Cow::Owned(imageops::resize(
                img,
                self.width,
                self.height,
                FilterType::Triangle,
            ))
        };

        self.normalizer.normalize(&resized)
    }
}
