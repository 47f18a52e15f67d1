//! Remote content assessment port.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ContentAssessment, CountrySpec, PhotoUpload};

/// Why a content assessment could not be obtained.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// The request never produced a response.
    #[error("transport error calling content model: {0}")]
    Transport(String),
    /// The model endpoint answered with a non-success status.
    #[error("content model returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response envelope could not be decoded.
    #[error("failed to decode content model response: {0}")]
    Decode(String),
    /// No answer within the allotted time.
    #[error("content model did not answer within {0:?}")]
    Timeout(Duration),
    /// The assessor lacks credentials or endpoint configuration.
    #[error("content assessor not configured: {0}")]
    NotConfigured(String),
}

/// Delegates visual checks (background, face, pose) to an external model.
///
/// Implementations receive the country spec only to phrase the request;
/// they do not enforce its values.
#[async_trait]
pub trait ContentAssessor: Send + Sync + 'static {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Assesses a photo.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError`] when the model cannot be reached or its
    /// envelope is unreadable. An unparseable answer *inside* a valid
    /// envelope is not an error; it yields an empty assessment.
    async fn assess(
        &self,
        photo: &PhotoUpload,
        spec: &CountrySpec,
    ) -> Result<ContentAssessment, AssessmentError>;
}
