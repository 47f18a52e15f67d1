//! Route handlers.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use passport_qa_core::domain::is_supported_mime;
use passport_qa_core::{CountrySpec, CountrySummary, LookupError, PhotoUpload, ValidationVerdict};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /countries`
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountrySummary>>, ApiError> {
    state
        .lookup
        .list_countries()
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to fetch countries", e))
}

/// `GET /specs/{country}`
pub async fn get_spec(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<CountrySpec>, ApiError> {
    find_spec(&state, &country, "Failed to fetch spec")
        .await
        .map(Json)
}

/// `POST /validate/{country}` with the raw photo as body.
pub async fn validate_photo(
    State(state): State<AppState>,
    Path(country): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ValidationVerdict>, ApiError> {
    let spec = find_spec(&state, &country, "Failed to validate photo").await?;

    let mime_type = content_type(&headers);
    if !is_supported_mime(&mime_type) {
        return Err(ApiError::UnsupportedMediaType(if mime_type.is_empty() {
            "none".to_string()
        } else {
            mime_type
        }));
    }

    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::internal("Failed to read upload", rejection.body_text())
        }
    })?;
    if bytes.is_empty() {
        return Err(ApiError::MissingPhoto);
    }

    debug!(
        country = %spec.country,
        mime_type = %mime_type,
        size = bytes.len(),
        "validating upload"
    );
    let photo = PhotoUpload::new(bytes.to_vec(), mime_type);
    Ok(Json(state.validator.validate(&photo, &spec).await))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

async fn find_spec(
    state: &AppState,
    country: &str,
    storage_message: &'static str,
) -> Result<CountrySpec, ApiError> {
    state.lookup.get_spec(country).await.map_err(|e| match e {
        LookupError::NotFound(_) => ApiError::CountryNotFound,
        LookupError::Storage(cause) => ApiError::internal(storage_message, cause),
    })
}

/// MIME essence of the `Content-Type` header, lowercased, without parameters.
fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default()
}
