//! Aggregate pass/fail result of validating one photo.

use serde::{Deserialize, Serialize};

use super::{ContentAssessment, ImageDimensions, ImageMetrics, IssueCategory, ValidationIssue};

/// Message carried by the single issue of a degraded verdict.
pub const RETRY_MESSAGE: &str = "Failed to analyze image. Please try again.";

/// Result of validating a photo against a country's requirements.
///
/// `passed` is computed from the issue list at construction and cannot be set
/// independently; deserialization recomputes it as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "VerdictRepr")]
pub struct ValidationVerdict {
    dimensions: ImageDimensions,
    file_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    face_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    face_coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eyes_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    neutral_expression: Option<bool>,
    issues: Vec<ValidationIssue>,
    passed: bool,
}

impl ValidationVerdict {
    /// Builds a verdict from measured metrics, the remote assessment and the
    /// final ordered issue list.
    #[must_use]
    pub fn new(
        metrics: &ImageMetrics,
        assessment: ContentAssessment,
        issues: Vec<ValidationIssue>,
    ) -> Self {
        let passed = issues.is_empty();
        Self {
            dimensions: metrics.dimensions,
            file_size: metrics.size_kb(),
            background_color: assessment.background_color,
            face_detected: assessment.face_detected,
            face_coverage: assessment.face_coverage,
            eyes_open: assessment.eyes_open,
            neutral_expression: assessment.neutral_expression,
            issues,
            passed,
        }
    }

    /// The verdict returned when a photo could not be analyzed at all.
    #[must_use]
    pub fn degraded() -> Self {
        Self::new(
            &ImageMetrics::new(0, 0, 0),
            ContentAssessment::default(),
            vec![ValidationIssue::error(IssueCategory::Other, RETRY_MESSAGE)],
        )
    }

    /// Measured pixel dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    /// Measured file size in kilobytes.
    #[must_use]
    pub const fn file_size(&self) -> f64 {
        self.file_size
    }

    /// Detected background colour, if reported.
    #[must_use]
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    /// Whether the model detected a face.
    #[must_use]
    pub const fn face_detected(&self) -> bool {
        self.face_detected
    }

    /// Detected face coverage in percent, if reported.
    #[must_use]
    pub const fn face_coverage(&self) -> Option<f64> {
        self.face_coverage
    }

    /// Detected eyes-open state, if reported.
    #[must_use]
    pub const fn eyes_open(&self) -> Option<bool> {
        self.eyes_open
    }

    /// Detected neutral-expression state, if reported.
    #[must_use]
    pub const fn neutral_expression(&self) -> Option<bool> {
        self.neutral_expression
    }

    /// Issues in detection order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// True iff there are no issues.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }
}

/// Wire shape accepted when deserializing; `passed` is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerdictRepr {
    dimensions: ImageDimensions,
    file_size: f64,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    face_detected: bool,
    #[serde(default)]
    face_coverage: Option<f64>,
    #[serde(default)]
    eyes_open: Option<bool>,
    #[serde(default)]
    neutral_expression: Option<bool>,
    #[serde(default)]
    issues: Vec<ValidationIssue>,
}

impl From<VerdictRepr> for ValidationVerdict {
    fn from(repr: VerdictRepr) -> Self {
        let passed = repr.issues.is_empty();
        Self {
            dimensions: repr.dimensions,
            file_size: repr.file_size,
            background_color: repr.background_color,
            face_detected: repr.face_detected,
            face_coverage: repr.face_coverage,
            eyes_open: repr.eyes_open,
            neutral_expression: repr.neutral_expression,
            issues: repr.issues,
            passed,
        }
    }
}
