//! Shared application state.

use std::sync::Arc;

use passport_qa_core::{PhotoValidator, SpecLookupService};

/// Largest accepted upload unless configured otherwise.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// State handed to every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub lookup: SpecLookupService,
    pub validator: Arc<PhotoValidator>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Creates state with the default upload limit.
    #[must_use]
    pub fn new(lookup: SpecLookupService, validator: Arc<PhotoValidator>) -> Self {
        Self {
            lookup,
            validator,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Overrides the upload limit in bytes.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
