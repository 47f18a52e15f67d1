//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod content_assessor;
mod photo_source;
mod progress;
mod spec_store;

pub use content_assessor::{AssessmentError, ContentAssessor};
pub use photo_source::{PhotoSource, SourcedPhoto};
pub use progress::{ProgressEvent, ProgressSink};
pub use spec_store::{SpecStore, StoreError};
