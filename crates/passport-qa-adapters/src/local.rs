//! Assessor used when remote assessment is switched off.

use async_trait::async_trait;
use passport_qa_core::domain::{ContentAssessment, CountrySpec, PhotoUpload};
use passport_qa_core::ports::{AssessmentError, ContentAssessor};

/// Reports nothing: no remote issues and no detected face.
///
/// Verdicts then reflect only the local dimension and size checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOnlyAssessor;

impl LocalOnlyAssessor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentAssessor for LocalOnlyAssessor {
    fn name(&self) -> &'static str {
        "local-only"
    }

    async fn assess(
        &self,
        _photo: &PhotoUpload,
        _spec: &CountrySpec,
    ) -> Result<ContentAssessment, AssessmentError> {
        Ok(ContentAssessment::default())
    }
}
