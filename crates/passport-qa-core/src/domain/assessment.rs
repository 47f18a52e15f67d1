//! Content assessment reported by the remote model.

use serde_json::{Map, Value};

use super::ValidationIssue;

/// Attributes the content model detected in a photo.
///
/// Every field is optional in the model's reply; absent or mistyped fields
/// fall back to `None` (or `false` for `face_detected`) and never produce
/// issues of their own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentAssessment {
    /// Detected background colour.
    pub background_color: Option<String>,
    /// Whether a face was found.
    pub face_detected: bool,
    /// Share of the frame the face occupies, in percent.
    pub face_coverage: Option<f64>,
    /// Whether both eyes are open.
    pub eyes_open: Option<bool>,
    /// Whether the expression is neutral.
    pub neutral_expression: Option<bool>,
    /// Free-text problems, in the order the model listed them.
    pub issues: Vec<String>,
}

impl ContentAssessment {
    /// Reads an assessment from a decoded JSON value.
    ///
    /// Anything that is not a JSON object yields the empty assessment.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_object).unwrap_or_default()
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            background_color: obj
                .get("backgroundColor")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            face_detected: obj
                .get("faceDetected")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            face_coverage: obj.get("faceCoverage").and_then(percentage),
            eyes_open: obj.get("eyesOpen").and_then(Value::as_bool),
            neutral_expression: obj.get("neutralExpression").and_then(Value::as_bool),
            issues: obj
                .get("issues")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Categorized issues, in model order.
    #[must_use]
    pub fn categorized_issues(&self) -> Vec<ValidationIssue> {
        self.issues
            .iter()
            .map(|text| ValidationIssue::from_remote(text.as_str()))
            .collect()
    }
}

/// Accepts `75`, `75.5` or strings like `"75%"`.
fn percentage(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IssueCategory;
    use serde_json::json;

    #[test]
    fn test_full_object() {
        let assessment = ContentAssessment::from_value(&json!({
            "backgroundColor": "white",
            "faceDetected": true,
            "faceCoverage": 72,
            "eyesOpen": true,
            "neutralExpression": false,
            "issues": ["Expression not neutral"]
        }));
        assert_eq!(assessment.background_color.as_deref(), Some("white"));
        assert!(assessment.face_detected);
        assert_eq!(assessment.face_coverage, Some(72.0));
        assert_eq!(assessment.eyes_open, Some(true));
        assert_eq!(assessment.neutral_expression, Some(false));
        assert_eq!(assessment.issues, vec!["Expression not neutral".to_string()]);
    }

    #[test]
    fn test_non_object_is_empty() {
        assert_eq!(
            ContentAssessment::from_value(&json!([1, 2, 3])),
            ContentAssessment::default()
        );
        assert_eq!(
            ContentAssessment::from_value(&Value::Null),
            ContentAssessment::default()
        );
    }

    #[test]
    fn test_partial_object_defaults() {
        let assessment = ContentAssessment::from_value(&json!({"issues": []}));
        assert!(!assessment.face_detected);
        assert!(assessment.background_color.is_none());
        assert!(assessment.face_coverage.is_none());
        assert!(assessment.eyes_open.is_none());
        assert!(assessment.issues.is_empty());
    }

    #[test]
    fn test_mistyped_fields_are_absent() {
        let assessment = ContentAssessment::from_value(&json!({
            "faceDetected": "yes",
            "eyesOpen": 1,
            "backgroundColor": 42,
            "issues": "Background is grey"
        }));
        assert!(!assessment.face_detected);
        assert!(assessment.eyes_open.is_none());
        assert!(assessment.background_color.is_none());
        assert!(assessment.issues.is_empty());
    }

    #[test]
    fn test_face_coverage_accepts_percent_string() {
        let assessment = ContentAssessment::from_value(&json!({"faceCoverage": " 75% "}));
        assert_eq!(assessment.face_coverage, Some(75.0));

        let assessment = ContentAssessment::from_value(&json!({"faceCoverage": "about half"}));
        assert!(assessment.face_coverage.is_none());
    }

    #[test]
    fn test_non_string_issues_skipped() {
        let assessment = ContentAssessment::from_value(&json!({
            "issues": ["Face too small", 7, null, "Glare"]
        }));
        assert_eq!(assessment.issues, vec!["Face too small", "Glare"]);
    }

    #[test]
    fn test_categorized_issues_keep_order() {
        let assessment = ContentAssessment {
            issues: vec![
                "Unknown artifact".into(),
                "Background is too dark".into(),
                "Face partially obscured".into(),
            ],
            ..ContentAssessment::default()
        };
        let categories: Vec<_> = assessment
            .categorized_issues()
            .into_iter()
            .map(|i| i.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                IssueCategory::Other,
                IssueCategory::Background,
                IssueCategory::Face
            ]
        );
    }
}
