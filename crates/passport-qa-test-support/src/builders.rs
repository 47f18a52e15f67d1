//! Synthetic photo and country spec builders for testing.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use passport_qa_core::domain::{CountrySpec, PhotoUpload};
use passport_qa_core::ports::SourcedPhoto;

/// Builder for synthetic passport photos.
///
/// Produces a real encoded image with the requested pixel dimensions. The
/// encoded bytes can be padded with trailing zeros to reach an exact file
/// size; decoders stop at the end-of-image marker so dimensions stay readable.
#[derive(Debug, Clone)]
pub struct SyntheticPhotoBuilder {
    width: u32,
    height: u32,
    pad_to: Option<usize>,
}

impl SyntheticPhotoBuilder {
    /// Starts a photo of the given dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pad_to: None,
        }
    }

    /// Pads the encoded file to exactly `kb * 1024` bytes.
    #[must_use]
    pub const fn size_kb(self, kb: usize) -> Self {
        self.size_bytes(kb * 1024)
    }

    /// Pads the encoded file to exactly `bytes` bytes.
    ///
    /// Has no effect if the encoded image is already larger.
    #[must_use]
    pub const fn size_bytes(mut self, bytes: usize) -> Self {
        self.pad_to = Some(bytes);
        self
    }

    // === Encoders ===

    /// Encodes as PNG.
    #[must_use]
    pub fn png(&self) -> PhotoUpload {
        PhotoUpload::new(self.encode(ImageFormat::Png), "image/png")
    }

    /// Encodes as JPEG.
    #[must_use]
    pub fn jpeg(&self) -> PhotoUpload {
        PhotoUpload::new(self.encode(ImageFormat::Jpeg), "image/jpeg")
    }

    /// Encodes as PNG and wraps it with a source path.
    #[must_use]
    pub fn sourced(&self, path: &str) -> SourcedPhoto {
        SourcedPhoto {
            path: path.to_string(),
            upload: self.png(),
        }
    }

    /// A light-grey portrait-like frame: uniform background with a darker
    /// ellipse where a face would sit.
    fn image(&self) -> DynamicImage {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        let img = RgbImage::from_fn(self.width, self.height, |x, y| {
            let dx = (f64::from(x) - w / 2.0) / (w * 0.3);
            let dy = (f64::from(y) - h * 0.45) / (h * 0.35);
            if dx * dx + dy * dy <= 1.0 {
                Rgb([190u8, 150, 120])
            } else {
                Rgb([235u8, 235, 235])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[allow(clippy::expect_used)]
    fn encode(&self, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        self.image()
            .write_to(&mut buf, format)
            .expect("in-memory encoding of a synthetic image");
        let mut bytes = buf.into_inner();
        if let Some(target) = self.pad_to {
            if bytes.len() < target {
                bytes.resize(target, 0);
            }
        }
        bytes
    }
}

/// Builder for [`CountrySpec`] records.
///
/// Defaults mirror the United States entry: 600x600 px, 240 KB,
/// white background, eyes open, neutral expression, 70% coverage.
#[derive(Debug, Clone)]
pub struct CountrySpecBuilder {
    spec: CountrySpec,
}

impl CountrySpecBuilder {
    /// Starts a spec for `country` with the default requirements.
    #[must_use]
    pub fn new(country: &str) -> Self {
        Self {
            spec: CountrySpec {
                country: country.to_string(),
                width: 600,
                height: 600,
                max_size_kb: 240.0,
                background_color: Some("White or off-white".to_string()),
                eyes_open: Some(true),
                neutral_expression: Some(true),
                face_coverage: Some(70.0),
                additional_requirements: Vec::new(),
            },
        }
    }

    /// Sets required pixel dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.spec.width = width;
        self.spec.height = height;
        self
    }

    /// Sets the size cap in KB.
    #[must_use]
    pub fn max_size_kb(mut self, kb: f64) -> Self {
        self.spec.max_size_kb = kb;
        self
    }

    /// Sets the expected background description.
    #[must_use]
    pub fn background(mut self, background: &str) -> Self {
        self.spec.background_color = Some(background.to_string());
        self
    }

    /// Appends an additional free-text requirement.
    #[must_use]
    pub fn requirement(mut self, rule: &str) -> Self {
        self.spec.additional_requirements.push(rule.to_string());
        self
    }

    /// Finishes the record.
    #[must_use]
    pub fn build(self) -> CountrySpec {
        self.spec
    }
}
