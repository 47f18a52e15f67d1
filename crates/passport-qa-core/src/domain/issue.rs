//! Issues detected while validating a passport photo.

use serde::{Deserialize, Serialize};

/// A single problem found in a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Category of the issue.
    #[serde(rename = "type")]
    pub category: IssueCategory,
    /// Human-readable description.
    pub message: String,
    /// How serious the issue is.
    pub severity: Severity,
}

impl ValidationIssue {
    /// Creates an error-severity issue.
    pub fn error(category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Creates an error issue for free text returned by the content model,
    /// categorized with [`IssueCategory::classify`].
    pub fn from_remote(text: impl Into<String>) -> Self {
        let message = text.into();
        Self::error(IssueCategory::classify(&message), message)
    }
}

/// Category of a validation issue.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Pixel dimensions differ from the requirement.
    Dimension,
    /// File exceeds the size cap.
    Size,
    /// Background does not meet the requirement.
    Background,
    /// Face detection, framing or coverage problem.
    Face,
    /// Facial expression problem.
    Expression,
    /// Anything else.
    Other,
}

impl IssueCategory {
    /// Keyword rules for free-text issues, checked in order; first match wins.
    const KEYWORDS: [(&'static str, Self); 3] = [
        ("background", Self::Background),
        ("face", Self::Face),
        ("expression", Self::Expression),
    ];

    /// Classifies free text by case-insensitive keyword match.
    ///
    /// A message naming several keywords takes the first in the order
    /// background, face, expression. Unmatched text is [`IssueCategory::Other`].
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map_or(Self::Other, |&(_, category)| category)
    }
}

/// Issue severity.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Fails the photo.
    Error,
    /// Advisory only.
    Warning,
}
