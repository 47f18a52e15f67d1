//! Photo source port for loading photos to validate in batch.

use crate::domain::PhotoUpload;

/// A photo loaded from a named location.
#[derive(Debug, Clone)]
pub struct SourcedPhoto {
    /// Where the photo came from (file path or synthetic name).
    pub path: String,
    /// The photo bytes and MIME type.
    pub upload: PhotoUpload,
}

/// Port for loading photos from a source.
pub trait PhotoSource: Send + Sync {
    /// Returns an iterator over photos from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a photo fails to load.
    fn photos(&self) -> Box<dyn Iterator<Item = anyhow::Result<SourcedPhoto>> + Send + '_>;

    /// Returns the total number of photos, if known.
    fn count_hint(&self) -> Option<usize>;
}
