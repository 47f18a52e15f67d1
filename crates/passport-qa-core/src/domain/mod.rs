//! Core domain types for passport photo validation.

mod assessment;
mod issue;
mod photo;
mod spec;
mod verdict;

pub use assessment::ContentAssessment;
pub use issue::{IssueCategory, Severity, ValidationIssue};
pub use photo::{
    is_supported_mime, ImageDimensions, ImageMetrics, MeasureError, PhotoUpload,
    SUPPORTED_MIME_TYPES,
};
pub use spec::{CountrySpec, CountrySummary, SpecError};
pub use verdict::{ValidationVerdict, RETRY_MESSAGE};
