//! Filesystem adapter for loading photos to validate.

use anyhow::{Context, Result};
use passport_qa_core::ports::{PhotoSource, SourcedPhoto};
use passport_qa_core::PhotoUpload;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions accepted for validation, with the MIME type each maps to.
const PHOTO_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
];

/// Filesystem photo source adapter.
pub struct FsPhotoSource {
    paths: Vec<PathBuf>,
    recursive: bool,
}

impl FsPhotoSource {
    /// Creates a new filesystem photo source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self { paths, recursive }
    }

    /// Collects all photo files from the configured paths, sorted within
    /// each directory.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_file() {
                if mime_for_path(path).is_some() {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            } else if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                warn!("Path does not exist: {}", path.display());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && mime_for_path(&path).is_some() {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl PhotoSource for FsPhotoSource {
    fn photos(&self) -> Box<dyn Iterator<Item = Result<SourcedPhoto>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} photo files", files.len());

        Box::new(files.into_iter().map(|path| load_photo(&path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// MIME type for a path's extension, if it is a supported photo format.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    PHOTO_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Reads a photo's bytes from the filesystem.
fn load_photo(path: &Path) -> Result<SourcedPhoto> {
    let mime_type = mime_for_path(path)
        .with_context(|| format!("Unsupported file type: {}", path.display()))?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read photo: {}", path.display()))?;

    Ok(SourcedPhoto {
        path: path.to_string_lossy().into_owned(),
        upload: PhotoUpload::new(bytes, mime_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("test.jpg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("test.JPEG")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("test.png")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("test.webp")), Some("image/webp"));
        assert_eq!(mime_for_path(Path::new("test.tiff")), None);
        assert_eq!(mime_for_path(Path::new("test.txt")), None);
        assert_eq!(mime_for_path(Path::new("test")), None);
    }
}
