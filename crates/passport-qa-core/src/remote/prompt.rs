//! Instruction text sent alongside the photo.

use std::fmt::Write as _;

use crate::domain::CountrySpec;

/// Builds the natural-language checklist for a country's requirements.
///
/// The reply format requested here is what [`super::parse_reply`] reads.
#[must_use]
pub fn build_instruction(spec: &CountrySpec) -> String {
    let mut out = String::from("Analyze this passport photo against these requirements:\n");
    let mut rule = |line: &str| {
        let _ = writeln!(out, "- {line}");
    };

    rule("Face must be clearly visible and detected in the image accurately");
    rule(&format!(
        "Required dimensions: {}x{} px",
        spec.width, spec.height
    ));
    rule(&format!("Maximum file size: {} KB", spec.max_size_kb));
    match spec.background_color.as_deref() {
        Some(bg) => rule(&format!("Background color should be: {bg}")),
        None => rule("Background color should be white or light-colored"),
    }
    rule("Face should be clearly visible and centered");
    if spec.eyes_open.unwrap_or(true) {
        rule("Eyes should be open and visible");
    }
    if spec.neutral_expression.unwrap_or(true) {
        rule("Neutral facial expression (no smiling)");
    }
    for extra in &spec.additional_requirements {
        rule(extra);
    }

    let coverage = spec
        .face_coverage
        .map_or_else(|| "70-80".to_string(), |c| c.to_string());
    let _ = write!(
        out,
        "\nProvide a JSON response with these fields:\n\
         - backgroundColor: detected background color\n\
         - faceDetected: boolean\n\
         - faceCoverage: percentage of frame the face occupies (ideal: {coverage}%)\n\
         - eyesOpen: boolean\n\
         - neutralExpression: boolean\n\
         - issues: array of specific problems with the photo\n"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> CountrySpec {
        CountrySpec {
            country: "Canada".into(),
            width: 420,
            height: 540,
            max_size_kb: 250.0,
            background_color: Some("White or light-colored".into()),
            eyes_open: Some(true),
            neutral_expression: Some(true),
            face_coverage: Some(70.0),
            additional_requirements: vec!["No red-eye effect".into()],
        }
    }

    #[test]
    fn test_includes_targets() {
        let text = build_instruction(&spec());
        assert!(text.contains("Required dimensions: 420x540 px"));
        assert!(text.contains("Maximum file size: 250 KB"));
        assert!(text.contains("Background color should be: White or light-colored"));
        assert!(text.contains("- No red-eye effect"));
        assert!(text.contains("(ideal: 70%)"));
    }

    #[test]
    fn test_requests_all_reply_fields() {
        let text = build_instruction(&spec());
        for field in [
            "backgroundColor",
            "faceDetected",
            "faceCoverage",
            "eyesOpen",
            "neutralExpression",
            "issues",
        ] {
            assert!(text.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_defaults_when_optional_fields_absent() {
        let mut spec = spec();
        spec.background_color = None;
        spec.face_coverage = None;
        spec.additional_requirements.clear();
        let text = build_instruction(&spec);
        assert!(text.contains("white or light-colored"));
        assert!(text.contains("(ideal: 70-80%)"));
    }

    #[test]
    fn test_pose_rules_follow_flags() {
        let mut spec = spec();
        spec.eyes_open = Some(false);
        spec.neutral_expression = Some(false);
        let text = build_instruction(&spec);
        assert!(!text.contains("Eyes should be open"));
        assert!(!text.contains("no smiling"));
    }
}
