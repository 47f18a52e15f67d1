//! Progress reporting port for UI integration.

/// Events emitted during a batch check for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Validation started for a photo.
    Started {
        /// Path to the photo.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total photos in batch, if known.
        total: Option<usize>,
    },
    /// Validation completed for a photo.
    Completed {
        /// Path to the photo.
        path: String,
        /// Whether the photo passed.
        passed: bool,
        /// Number of issues found.
        issues: usize,
    },
    /// A photo was skipped because it could not be loaded.
    Skipped {
        /// Path to the photo.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All photos have been processed.
    Finished {
        /// Total photos validated.
        processed: usize,
        /// Total photos skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
