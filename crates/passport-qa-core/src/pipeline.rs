//! End-to-end validation of one photo against one country spec.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::assembler::ResultAssembler;
use crate::checks::LocalMetricChecker;
use crate::domain::{
    ContentAssessment, CountrySpec, ImageMetrics, PhotoUpload, ValidationVerdict,
};
use crate::ports::{AssessmentError, ContentAssessor};

/// Default budget for one remote assessment.
pub const DEFAULT_ASSESS_TIMEOUT: Duration = Duration::from_secs(30);

/// Measures, checks, assesses and assembles a verdict.
///
/// Stateless apart from its injected assessor; share it behind an `Arc`.
pub struct PhotoValidator {
    checker: LocalMetricChecker,
    assembler: ResultAssembler,
    assessor: Arc<dyn ContentAssessor>,
    timeout: Duration,
}

impl PhotoValidator {
    /// Creates a validator with the default timeout.
    #[must_use]
    pub fn new(assessor: Arc<dyn ContentAssessor>) -> Self {
        Self {
            checker: LocalMetricChecker::new(),
            assembler: ResultAssembler::new(),
            assessor,
            timeout: DEFAULT_ASSESS_TIMEOUT,
        }
    }

    /// Overrides the remote assessment timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout applied to each remote assessment.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validates a photo. Never fails: any measurement or assessment
    /// failure yields [`ValidationVerdict::degraded`].
    pub async fn validate(&self, photo: &PhotoUpload, spec: &CountrySpec) -> ValidationVerdict {
        let metrics = match ImageMetrics::measure(photo) {
            Ok(m) => m,
            Err(e) => {
                warn!(country = %spec.country, error = %e, "photo could not be measured");
                return ValidationVerdict::degraded();
            }
        };
        debug!(
            width = metrics.dimensions.width,
            height = metrics.dimensions.height,
            size_kb = metrics.size_kb(),
            "measured photo"
        );

        let local_issues = self.checker.check(&metrics, spec);

        let assessment = match self.assess(photo, spec).await {
            Ok(a) => a,
            Err(e) => {
                warn!(
                    assessor = self.assessor.name(),
                    country = %spec.country,
                    error = %e,
                    "content assessment failed"
                );
                return ValidationVerdict::degraded();
            }
        };

        let verdict = self.assembler.assemble(&metrics, local_issues, assessment);
        info!(
            country = %spec.country,
            passed = verdict.passed(),
            issues = verdict.issues().len(),
            "photo validated"
        );
        verdict
    }

    async fn assess(
        &self,
        photo: &PhotoUpload,
        spec: &CountrySpec,
    ) -> Result<ContentAssessment, AssessmentError> {
        tokio::time::timeout(self.timeout, self.assessor.assess(photo, spec))
            .await
            .map_err(|_| AssessmentError::Timeout(self.timeout))?
    }
}
