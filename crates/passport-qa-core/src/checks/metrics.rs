//! Dimension and file-size checks.

use crate::domain::{CountrySpec, ImageMetrics, IssueCategory, ValidationIssue};

/// Compares measured image metrics against a country's requirements.
///
/// Emits at most one dimension issue followed by at most one size issue.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMetricChecker;

impl LocalMetricChecker {
    /// Creates a new checker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs all local checks, dimension first, then size.
    #[must_use]
    pub fn check(&self, metrics: &ImageMetrics, spec: &CountrySpec) -> Vec<ValidationIssue> {
        [
            Self::check_dimensions(metrics, spec),
            Self::check_file_size(metrics, spec),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Exact match on both width and height; no tolerance.
    fn check_dimensions(metrics: &ImageMetrics, spec: &CountrySpec) -> Option<ValidationIssue> {
        let actual = metrics.dimensions;
        if actual.width == spec.width && actual.height == spec.height {
            return None;
        }
        Some(ValidationIssue::error(
            IssueCategory::Dimension,
            format!(
                "Image dimensions must be {}x{}px. Yours: {}x{}px",
                spec.width, spec.height, actual.width, actual.height
            ),
        ))
    }

    /// Size must not exceed the cap; equal to the cap passes.
    fn check_file_size(metrics: &ImageMetrics, spec: &CountrySpec) -> Option<ValidationIssue> {
        let size_kb = metrics.size_kb();
        if size_kb <= spec.max_size_kb {
            return None;
        }
        // Ties round up, not to even
        let shown = (size_kb * 10.0).round() / 10.0;
        Some(ValidationIssue::error(
            IssueCategory::Size,
            format!(
                "File size must be under {}KB. Yours: {shown:.1}KB",
                spec.max_size_kb
            ),
        ))
    }
}
