//! Country specification storage port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CountrySpec, CountrySummary};

/// The backing store could not be read.
#[derive(Debug, Clone, Error)]
#[error("spec store unavailable: {0}")]
pub struct StoreError(pub String);

/// Read-only access to the country specification table.
#[async_trait]
pub trait SpecStore: Send + Sync + 'static {
    /// Lists every stored country, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    async fn list_countries(&self) -> Result<Vec<CountrySummary>, StoreError>;

    /// Finds the record whose country name equals `country` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails. A missing record is
    /// `Ok(None)`, not an error.
    async fn find_spec(&self, country: &str) -> Result<Option<CountrySpec>, StoreError>;
}
