//! Image decoding: raw submitted bytes to a pixel buffer.

use crate::core::ScanError;
use image::{ImageFormat, RgbImage};

/// A user-submitted image: opaque bytes plus the MIME type declared by the
/// submitter (from file selection or drag-and-drop).
///
/// Created on submission and consumed by [`decode`]; the byte source is
/// discarded once preprocessing completes or fails.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    bytes: Vec<u8>,
    mime: Option<String>,
}

impl ImageAsset {
    /// Creates an asset from raw bytes and an optional declared MIME type.
    pub fn new(bytes: Vec<u8>, mime: Option<String>) -> Self {
        Self { bytes, mime }
    }

    /// The declared MIME type, if any.
    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    /// Number of submitted bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the submission carried no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decodes a submitted asset into an RGB pixel buffer.
///
/// The declared MIME type gates obviously wrong submissions early; the actual
/// format is sniffed from the bytes, so a missing or generic declaration still
/// decodes. Only PNG and JPEG payloads are accepted.
///
/// # Errors
///
/// Returns [`ScanError::EmptyInput`] for a zero-byte payload,
/// [`ScanError::UnsupportedMime`] for non-image declarations or unsupported
/// formats, and [`ScanError::Decode`] for corrupt image data.
pub fn decode(asset: ImageAsset) -> Result<RgbImage, ScanError> {
    if asset.is_empty() {
        return Err(ScanError::EmptyInput);
    }

    if let Some(mime) = asset.mime() {
        if !mime.starts_with("image/") {
            return Err(ScanError::UnsupportedMime {
                mime: mime.to_string(),
            });
        }
    }

    let format = image::guess_format(&asset.bytes)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(ScanError::UnsupportedMime {
            mime: format.to_mime_type().to_string(),
        });
    }

    let decoded = image::load_from_memory_with_format(&asset.bytes, format)?;
    Ok(decoded.to_rgb8())
}
