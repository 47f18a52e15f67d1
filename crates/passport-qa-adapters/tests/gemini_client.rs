//! Integration tests for the Gemini client against a wiremock server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use base64::Engine as _;
use passport_qa_adapters::{GeminiAssessor, GeminiConfig};
use passport_qa_core::{AssessmentError, ContentAssessor, CountrySpec, PhotoUpload};
use passport_qa_test_support::{CountrySpecBuilder, SyntheticPhotoBuilder};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn assessor(server: &MockServer) -> GeminiAssessor {
    let config =
        GeminiConfig::new("test-api-key").with_base_url(format!("{}/v1beta", server.uri()));
    GeminiAssessor::new(config).expect("assessor build")
}

fn canada() -> CountrySpec {
    CountrySpecBuilder::new("Canada")
        .dimensions(420, 540)
        .max_size_kb(250.0)
        .background("White or light-colored")
        .build()
}

fn photo() -> PhotoUpload {
    SyntheticPhotoBuilder::new(16, 16).png()
}

fn reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

// === Request shape ===

#[tokio::test]
async fn test_request_carries_instruction_and_inline_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("{}")))
        .expect(1)
        .mount(&server)
        .await;

    let photo = photo();
    assessor(&server).assess(&photo, &canada()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let parts = &body["contents"][0]["parts"];

    let text = parts[0]["text"].as_str().unwrap();
    assert!(text.contains("Required dimensions: 420x540 px"));
    assert!(text.contains("White or light-colored"));

    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
    let data = parts[1]["inline_data"]["data"].as_str().unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(data)
        .unwrap();
    assert_eq!(decoded, photo.bytes);
}

// === Reply parsing ===

#[tokio::test]
async fn test_fenced_reply_is_parsed() {
    let server = MockServer::start().await;
    let text = "Here is my analysis:\n```json\n{\"backgroundColor\": \"white\", \"faceDetected\": true, \"faceCoverage\": 72, \"eyesOpen\": true, \"neutralExpression\": false, \"issues\": [\"Expression not neutral\"]}\n```";
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply(text)))
        .mount(&server)
        .await;

    let assessment = assessor(&server).assess(&photo(), &canada()).await.unwrap();

    assert_eq!(assessment.background_color.as_deref(), Some("white"));
    assert!(assessment.face_detected);
    assert_eq!(assessment.face_coverage, Some(72.0));
    assert_eq!(assessment.eyes_open, Some(true));
    assert_eq!(assessment.neutral_expression, Some(false));
    assert_eq!(assessment.issues, vec!["Expression not neutral"]);
}

#[tokio::test]
async fn test_prose_reply_yields_empty_assessment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reply("I cannot assess this photo.")),
        )
        .mount(&server)
        .await;

    let assessment = assessor(&server).assess(&photo(), &canada()).await.unwrap();
    assert!(!assessment.face_detected);
    assert!(assessment.issues.is_empty());
}

// === Failures ===

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = assessor(&server)
        .assess(&photo(), &canada())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AssessmentError::Status { status: 503, ref body } if body == "overloaded"
    ));
}

#[tokio::test]
async fn test_bad_key_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid" }
        })))
        .mount(&server)
        .await;

    let err = assessor(&server)
        .assess(&photo(), &canada())
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Status { status: 403, .. }));
}

#[tokio::test]
async fn test_non_json_envelope_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = assessor(&server)
        .assess(&photo(), &canada())
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Decode(_)));
}

#[tokio::test]
async fn test_empty_candidates_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = assessor(&server)
        .assess(&photo(), &canada())
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let config = GeminiConfig::new("test-api-key").with_base_url("http://127.0.0.1:9");
    let err = GeminiAssessor::new(config)
        .unwrap()
        .assess(&photo(), &canada())
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Transport(_)));
}

#[tokio::test]
async fn test_slow_reply_is_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reply("{}"))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = GeminiConfig::new("test-api-key")
        .with_base_url(format!("{}/v1beta", server.uri()))
        .with_timeout_secs(1);
    let err = GeminiAssessor::new(config)
        .unwrap()
        .assess(&photo(), &canada())
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Timeout(_)));
}
