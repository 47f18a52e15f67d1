//! Country specification lookup over an injected [`SpecStore`].

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::domain::{CountrySpec, CountrySummary};
use crate::ports::{SpecStore, StoreError};

/// Failure modes of a lookup. Callers must keep them apart.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No record matches the requested name exactly.
    #[error("Country not found: {0}")]
    NotFound(String),
    /// The store itself failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Read-only lookup service: list country names, fetch one spec.
#[derive(Clone)]
pub struct SpecLookupService {
    store: Arc<dyn SpecStore>,
}

impl SpecLookupService {
    /// Creates a lookup service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn SpecStore>) -> Self {
        Self { store }
    }

    /// Lists every stored country, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Storage`] if the store fails.
    pub async fn list_countries(&self) -> Result<Vec<CountrySummary>, LookupError> {
        let countries = self.store.list_countries().await.map_err(|e| {
            error!(error = %e, "listing countries failed");
            LookupError::Storage(e)
        })?;
        debug!(count = countries.len(), "listed countries");
        Ok(countries)
    }

    /// Fetches the spec whose country name equals `country` exactly.
    ///
    /// No case folding or trimming is applied.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] on a miss and
    /// [`LookupError::Storage`] if the store fails.
    pub async fn get_spec(&self, country: &str) -> Result<CountrySpec, LookupError> {
        match self.store.find_spec(country).await {
            Ok(Some(spec)) => Ok(spec),
            Ok(None) => {
                debug!(country, "no spec for country");
                Err(LookupError::NotFound(country.to_string()))
            }
            Err(e) => {
                error!(country, error = %e, "fetching spec failed");
                Err(LookupError::Storage(e))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedStore(Vec<CountrySpec>);

    #[async_trait]
    impl SpecStore for FixedStore {
        async fn list_countries(&self) -> Result<Vec<CountrySummary>, StoreError> {
            Ok(self.0.iter().map(CountrySpec::summary).collect())
        }

        async fn find_spec(&self, country: &str) -> Result<Option<CountrySpec>, StoreError> {
            Ok(self.0.iter().find(|s| s.country == country).cloned())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl SpecStore for BrokenStore {
        async fn list_countries(&self) -> Result<Vec<CountrySummary>, StoreError> {
            Err(StoreError("connection refused".into()))
        }

        async fn find_spec(&self, _country: &str) -> Result<Option<CountrySpec>, StoreError> {
            Err(StoreError("connection refused".into()))
        }
    }

    fn spec(country: &str) -> CountrySpec {
        CountrySpec {
            country: country.into(),
            width: 600,
            height: 600,
            max_size_kb: 240.0,
            background_color: None,
            eyes_open: None,
            neutral_expression: None,
            face_coverage: None,
            additional_requirements: vec![],
        }
    }

    fn service(specs: Vec<CountrySpec>) -> SpecLookupService {
        SpecLookupService::new(Arc::new(FixedStore(specs)))
    }

    #[tokio::test]
    async fn test_list_preserves_storage_order() {
        let svc = service(vec![spec("Japan"), spec("Canada"), spec("India")]);
        let names: Vec<_> = svc
            .list_countries()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.country)
            .collect();
        assert_eq!(names, vec!["Japan", "Canada", "India"]);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        assert!(service(vec![]).list_countries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_spec_exact_match() {
        let svc = service(vec![spec("United States")]);
        assert_eq!(svc.get_spec("United States").await.unwrap().width, 600);
    }

    #[tokio::test]
    async fn test_get_spec_missing_is_not_found() {
        let svc = service(vec![spec("Japan")]);
        assert!(matches!(
            svc.get_spec("France").await,
            Err(LookupError::NotFound(c)) if c == "France"
        ));
    }

    #[tokio::test]
    async fn test_get_spec_is_case_sensitive() {
        let svc = service(vec![spec("Japan")]);
        assert!(matches!(
            svc.get_spec("japan").await,
            Err(LookupError::NotFound(_))
        ));
        assert!(matches!(
            svc.get_spec(" Japan").await,
            Err(LookupError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_fault_is_distinct() {
        let svc = SpecLookupService::new(Arc::new(BrokenStore));
        assert!(matches!(
            svc.get_spec("Japan").await,
            Err(LookupError::Storage(_))
        ));
        assert!(matches!(
            svc.list_countries().await,
            Err(LookupError::Storage(_))
        ));
    }
}
