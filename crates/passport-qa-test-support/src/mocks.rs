//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use passport_qa_core::domain::{ContentAssessment, CountrySpec, CountrySummary, PhotoUpload};
use passport_qa_core::ports::{
    AssessmentError, ContentAssessor, PhotoSource, ProgressEvent, ProgressSink, SourcedPhoto,
    SpecStore, StoreError,
};

/// Mock implementation of `SpecStore` for testing.
///
/// Serves a fixed list of records, or fails every call when built with
/// [`MockSpecStore::failing`].
pub struct MockSpecStore {
    specs: Vec<CountrySpec>,
    fault: Option<String>,
    call_count: Arc<Mutex<usize>>,
}

impl MockSpecStore {
    /// Creates a store holding the given records, in order.
    #[must_use]
    pub fn new(specs: Vec<CountrySpec>) -> Self {
        Self {
            specs,
            fault: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty store.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Creates a store whose every call fails with `reason`.
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            fault: Some(reason.to_string()),
            ..Self::empty()
        }
    }

    /// Returns the number of calls made against the store.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self) -> Result<(), StoreError> {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        match &self.fault {
            Some(reason) => Err(StoreError(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SpecStore for MockSpecStore {
    async fn list_countries(&self) -> Result<Vec<CountrySummary>, StoreError> {
        self.record_call()?;
        Ok(self.specs.iter().map(CountrySpec::summary).collect())
    }

    async fn find_spec(&self, country: &str) -> Result<Option<CountrySpec>, StoreError> {
        self.record_call()?;
        Ok(self.specs.iter().find(|s| s.country == country).cloned())
    }
}

/// Scripted behaviour of a [`MockContentAssessor`].
#[derive(Debug, Clone)]
pub enum AssessorReply {
    /// Return this assessment.
    Assessment(ContentAssessment),
    /// Fail with a transport error carrying this message.
    Fail(String),
    /// Never answer within any reasonable timeout.
    Hang,
}

/// A call observed by a [`MockContentAssessor`].
#[derive(Debug, Clone)]
pub struct AssessorCall {
    /// Country of the spec passed in.
    pub country: String,
    /// MIME type of the photo.
    pub mime_type: String,
    /// Size of the photo in bytes.
    pub size: usize,
}

/// Mock implementation of `ContentAssessor` for testing.
///
/// Replies according to its script and captures every call.
pub struct MockContentAssessor {
    reply: AssessorReply,
    calls: Arc<Mutex<Vec<AssessorCall>>>,
}

impl MockContentAssessor {
    /// Creates an assessor with a scripted reply.
    #[must_use]
    pub fn new(reply: AssessorReply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A face was found and there are no issues.
    #[must_use]
    pub fn passing() -> Self {
        Self::new(AssessorReply::Assessment(ContentAssessment {
            face_detected: true,
            ..ContentAssessment::default()
        }))
    }

    /// A face was found along with the given free-text issues.
    #[must_use]
    pub fn with_issues(issues: &[&str]) -> Self {
        Self::new(AssessorReply::Assessment(ContentAssessment {
            face_detected: true,
            issues: issues.iter().map(ToString::to_string).collect(),
            ..ContentAssessment::default()
        }))
    }

    /// Every call fails like a network error.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self::new(AssessorReply::Fail(message.to_string()))
    }

    /// Every call stalls.
    #[must_use]
    pub fn hanging() -> Self {
        Self::new(AssessorReply::Hang)
    }

    /// Returns all captured calls.
    #[must_use]
    pub fn calls(&self) -> Vec<AssessorCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl ContentAssessor for MockContentAssessor {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn assess(
        &self,
        photo: &PhotoUpload,
        spec: &CountrySpec,
    ) -> Result<ContentAssessment, AssessmentError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(AssessorCall {
                country: spec.country.clone(),
                mime_type: photo.mime_type.clone(),
                size: photo.len(),
            });

        match &self.reply {
            AssessorReply::Assessment(a) => Ok(a.clone()),
            AssessorReply::Fail(message) => Err(AssessmentError::Transport(message.clone())),
            AssessorReply::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Ok(ContentAssessment::default())
            }
        }
    }
}

/// Mock implementation of `PhotoSource` for testing.
///
/// Yields pre-built photos, and an error item for every entry in `failures`.
pub struct MockPhotoSource {
    photos: Vec<SourcedPhoto>,
    failures: Vec<String>,
    count_hint_calls: Arc<Mutex<usize>>,
}

impl MockPhotoSource {
    /// Creates a new mock source with the given photos.
    #[must_use]
    pub fn new(photos: Vec<SourcedPhoto>) -> Self {
        Self {
            photos,
            failures: Vec::new(),
            count_hint_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Adds an unreadable entry that yields an error when iterated.
    #[must_use]
    pub fn with_failure(mut self, reason: &str) -> Self {
        self.failures.push(reason.to_string());
        self
    }

    /// Returns how often the total was asked for.
    #[must_use]
    pub fn count_hint_calls(&self) -> usize {
        *self
            .count_hint_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PhotoSource for MockPhotoSource {
    fn photos(&self) -> Box<dyn Iterator<Item = anyhow::Result<SourcedPhoto>> + Send + '_> {
        let ok = self.photos.iter().cloned().map(Ok);
        let failed = self
            .failures
            .iter()
            .map(|reason| Err(anyhow::anyhow!("{reason}")));
        Box::new(ok.chain(failed))
    }

    fn count_hint(&self) -> Option<usize> {
        *self
            .count_hint_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Some(self.photos.len() + self.failures.len())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
