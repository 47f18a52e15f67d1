//! Test support utilities for passport-qa.
//!
//! Provides mocks of the core ports, synthetic photo builders, and country
//! spec builders for testing the validation pipeline and HTTP surface.
//!
//! # Example
//!
//! ```
//! use passport_qa_test_support::{CountrySpecBuilder, MockSpecStore, SyntheticPhotoBuilder};
//!
//! // A 600x600 PNG padded to 200 KB
//! let photo = SyntheticPhotoBuilder::new(600, 600).size_kb(200).png();
//!
//! // A store holding one country
//! let store = MockSpecStore::new(vec![CountrySpecBuilder::new("United States").build()]);
//! ```

mod builders;
mod mocks;

pub use builders::{CountrySpecBuilder, SyntheticPhotoBuilder};
pub use mocks::{
    AssessorCall, AssessorReply, MockContentAssessor, MockPhotoSource, MockProgressSink,
    MockSpecStore,
};
