//! Country photo-requirement records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stored photo requirements for one country.
///
/// Identity is the `country` field, matched exactly and case-sensitively.
/// Records are immutable once seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySpec {
    /// Country name, unique within a store.
    pub country: String,
    /// Required width in pixels.
    pub width: u32,
    /// Required height in pixels.
    pub height: u32,
    /// Maximum file size in kilobytes.
    #[serde(rename = "maxSizeKB")]
    pub max_size_kb: f64,
    /// Expected background, as free text (e.g. "White or off-white").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Whether eyes must be open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes_open: Option<bool>,
    /// Whether a neutral expression is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral_expression: Option<bool>,
    /// Target share of the frame covered by the face, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_coverage: Option<f64>,
    /// Extra free-text rules, in display order.
    #[serde(default)]
    pub additional_requirements: Vec<String>,
}

impl CountrySpec {
    /// Checks the structural constraints a seeded record must satisfy.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] naming the first violated constraint.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.country.trim().is_empty() {
            return Err(SpecError::EmptyCountry);
        }
        if self.width == 0 || self.height == 0 {
            return Err(SpecError::InvalidDimensions {
                country: self.country.clone(),
                width: self.width,
                height: self.height,
            });
        }
        if !self.max_size_kb.is_finite() || self.max_size_kb <= 0.0 {
            return Err(SpecError::InvalidMaxSize {
                country: self.country.clone(),
                max_size_kb: self.max_size_kb,
            });
        }
        Ok(())
    }

    /// Projects this record down to its country name.
    #[must_use]
    pub fn summary(&self) -> CountrySummary {
        CountrySummary {
            country: self.country.clone(),
        }
    }
}

/// The `{country}` projection returned when listing countries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    /// Country name.
    pub country: String,
}

/// A seed record that cannot be admitted to a store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// The country name is empty or whitespace.
    #[error("country name must not be empty")]
    EmptyCountry,
    /// Width or height is zero.
    #[error("{country}: dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        country: String,
        width: u32,
        height: u32,
    },
    /// The size cap is zero, negative or not a number.
    #[error("{country}: maxSizeKB must be a positive number, got {max_size_kb}")]
    InvalidMaxSize { country: String, max_size_kb: f64 },
    /// Two records share a country name.
    #[error("duplicate country record: {0}")]
    DuplicateCountry(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> CountrySpec {
        CountrySpec {
            country: "Japan".into(),
            width: 600,
            height: 600,
            max_size_kb: 200.0,
            background_color: Some("Blue or white".into()),
            eyes_open: Some(true),
            neutral_expression: Some(true),
            face_coverage: Some(70.0),
            additional_requirements: vec!["No hats or other head coverings".into()],
        }
    }

    #[test]
    fn test_deserialize_persisted_shape() {
        let json = r#"{
            "country": "India",
            "width": 450,
            "height": 450,
            "maxSizeKB": 150,
            "backgroundColor": "White",
            "eyesOpen": true,
            "neutralExpression": true,
            "faceCoverage": 75,
            "additionalRequirements": ["Both ears should be visible"]
        }"#;
        let spec: CountrySpec = serde_json::from_str(json).expect("parse record");
        assert_eq!(spec.country, "India");
        assert_eq!(spec.width, 450);
        assert!((spec.max_size_kb - 150.0).abs() < f64::EPSILON);
        assert_eq!(spec.face_coverage, Some(75.0));
        assert_eq!(spec.additional_requirements.len(), 1);
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let json = r#"{"country": "Nowhere", "width": 1, "height": 2, "maxSizeKB": 3.5}"#;
        let spec: CountrySpec = serde_json::from_str(json).expect("parse minimal record");
        assert!(spec.background_color.is_none());
        assert!(spec.eyes_open.is_none());
        assert!(spec.additional_requirements.is_empty());
    }

    #[test]
    fn test_serializes_max_size_key() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["maxSizeKB"], 200.0);
        assert_eq!(value["backgroundColor"], "Blue or white");
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        let mut spec = sample();
        spec.width = 0;
        assert!(matches!(
            spec.validate(),
            Err(SpecError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_size() {
        let mut spec = sample();
        spec.max_size_kb = 0.0;
        assert!(matches!(spec.validate(), Err(SpecError::InvalidMaxSize { .. })));

        spec.max_size_kb = f64::NAN;
        assert!(matches!(spec.validate(), Err(SpecError::InvalidMaxSize { .. })));
    }

    #[test]
    fn test_validate_rejects_blank_country() {
        let mut spec = sample();
        spec.country = "   ".into();
        assert_eq!(spec.validate(), Err(SpecError::EmptyCountry));
    }

    #[test]
    fn test_summary_projects_country_only() {
        let value = serde_json::to_value(sample().summary()).unwrap();
        assert_eq!(value, serde_json::json!({"country": "Japan"}));
    }
}
