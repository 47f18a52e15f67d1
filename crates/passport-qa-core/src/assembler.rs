//! Merges local and remote findings into a single verdict.

use crate::domain::{ContentAssessment, ImageMetrics, ValidationIssue, ValidationVerdict};

/// Concatenates local issues with categorized remote issues.
///
/// Order is preserved as given: local issues first (dimension, then size),
/// then remote issues in the order the model returned them. No dedup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAssembler;

impl ResultAssembler {
    /// Creates a new assembler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the verdict.
    #[must_use]
    pub fn assemble(
        &self,
        metrics: &ImageMetrics,
        local_issues: Vec<ValidationIssue>,
        assessment: ContentAssessment,
    ) -> ValidationVerdict {
        let mut issues = local_issues;
        issues.extend(assessment.categorized_issues());
        ValidationVerdict::new(metrics, assessment, issues)
    }
}
