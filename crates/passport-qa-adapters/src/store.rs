//! In-memory country spec store seeded from JSON.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use passport_qa_core::domain::{CountrySpec, CountrySummary, SpecError};
use passport_qa_core::ports::{SpecStore, StoreError};
use thiserror::Error;
use tracing::debug;

/// The eight countries shipped with the application.
const BUNDLED_SEED: &str = include_str!("../data/countryspec.json");

/// Why a seed could not be loaded.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid seed record: {0}")]
    Invalid(#[from] SpecError),
}

/// Read-only store holding validated records in seed order.
#[derive(Debug, Clone)]
pub struct InMemorySpecStore {
    specs: Vec<CountrySpec>,
}

impl InMemorySpecStore {
    /// Builds a store from records, rejecting invalid or duplicate entries.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Invalid`] for the first record that fails
    /// [`CountrySpec::validate`] or repeats an earlier country name.
    pub fn from_records(specs: Vec<CountrySpec>) -> Result<Self, SeedError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            spec.validate()?;
            if !seen.insert(spec.country.as_str()) {
                return Err(SpecError::DuplicateCountry(spec.country.clone()).into());
            }
        }
        debug!(count = specs.len(), "seeded spec store");
        Ok(Self { specs })
    }

    /// Parses a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of records or a
    /// record is invalid.
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        let specs: Vec<CountrySpec> = serde_json::from_str(text)?;
        Self::from_records(specs)
    }

    /// Reads and parses a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are
    /// rejected by [`Self::from_json`].
    pub fn load_json(path: &Path) -> Result<Self, SeedError> {
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The built-in seed.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled data itself is broken.
    pub fn bundled() -> Result<Self, SeedError> {
        Self::from_json(BUNDLED_SEED)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the store has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[async_trait]
impl SpecStore for InMemorySpecStore {
    async fn list_countries(&self) -> Result<Vec<CountrySummary>, StoreError> {
        Ok(self.specs.iter().map(CountrySpec::summary).collect())
    }

    async fn find_spec(&self, country: &str) -> Result<Option<CountrySpec>, StoreError> {
        Ok(self.specs.iter().find(|s| s.country == country).cloned())
    }
}
