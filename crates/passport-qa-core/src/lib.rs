//! Passport QA Core - Domain logic and validation pipeline
//!
//! This crate contains the country specification model, the local metric
//! checks, the remote assessment ports and reply parsing, and the pipeline
//! that assembles a pass/fail verdict for a passport photo.

pub mod assembler;
pub mod checks;
pub mod domain;
pub mod lookup;
pub mod pipeline;
pub mod ports;
pub mod remote;

pub use assembler::ResultAssembler;
pub use checks::LocalMetricChecker;
pub use domain::{
    ContentAssessment, CountrySpec, CountrySummary, ImageDimensions, ImageMetrics, IssueCategory,
    PhotoUpload, Severity, SpecError, ValidationIssue, ValidationVerdict,
};
pub use lookup::{LookupError, SpecLookupService};
pub use pipeline::PhotoValidator;
pub use ports::{
    AssessmentError, ContentAssessor, PhotoSource, ProgressEvent, ProgressSink, SourcedPhoto,
    SpecStore, StoreError,
};
