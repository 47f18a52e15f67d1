//! Uploaded photos and their locally measured metrics.

use std::io::Cursor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME types accepted for validation.
pub const SUPPORTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Raw photo bytes plus their declared MIME type.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
}

impl PhotoUpload {
    /// Creates an upload from bytes and a MIME type.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Size of the encoded file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the upload carries no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Returns whether a MIME type is accepted for validation.
#[must_use]
pub fn is_supported_mime(mime_type: &str) -> bool {
    SUPPORTED_MIME_TYPES.contains(&mime_type.trim().to_ascii_lowercase().as_str())
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates new image dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Measurements taken from the photo without any remote call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageMetrics {
    /// Pixel dimensions.
    pub dimensions: ImageDimensions,
    /// Encoded size in bytes.
    pub size_bytes: u64,
}

/// The photo header could not be read.
#[derive(Debug, Error)]
#[error("unable to read image dimensions: {0}")]
pub struct MeasureError(#[from] image::ImageError);

impl ImageMetrics {
    /// Creates metrics from known values.
    #[must_use]
    pub const fn new(width: u32, height: u32, size_bytes: u64) -> Self {
        Self {
            dimensions: ImageDimensions::new(width, height),
            size_bytes,
        }
    }

    /// Measures an encoded photo, decoding only its header.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError`] when the format cannot be recognised or the
    /// header is malformed.
    pub fn measure(photo: &PhotoUpload) -> Result<Self, MeasureError> {
        let reader = image::ImageReader::new(Cursor::new(photo.bytes.as_slice()))
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?;
        let (width, height) = reader.into_dimensions()?;
        Ok(Self::new(width, height, photo.len() as u64))
    }

    /// File size in kilobytes (bytes / 1024).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}
