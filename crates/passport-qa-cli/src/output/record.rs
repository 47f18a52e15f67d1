//! One line of `check` output.

use passport_qa_core::ValidationVerdict;
use serde::Serialize;
use tracing::debug;

/// A verdict for one file, tagged with where and when it was produced.
///
/// Serializes as the verdict's fields plus `path`, `country` and
/// `timestamp` at the top level.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRecord {
    /// Path of the checked file.
    pub path: String,
    /// Country the file was checked against.
    pub country: String,
    /// RFC 3339 UTC time of the check.
    pub timestamp: String,
    #[serde(flatten)]
    pub verdict: ValidationVerdict,
}

impl CheckRecord {
    /// Stamps a verdict with the current time.
    #[must_use]
    pub fn new(path: String, country: String, verdict: ValidationVerdict) -> Self {
        Self {
            path,
            country,
            timestamp: iso_timestamp(),
            verdict,
        }
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
