//! API error type.
//!
//! Every failure is answered with a `{"error": "..."}` body. Server-side
//! faults are logged with their cause, and the client only sees the
//! generic message attached to the route.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unknown country (404).
    #[error("Country not found")]
    CountryNotFound,

    /// Body is empty (400).
    #[error("No photo uploaded")]
    MissingPhoto,

    /// Content type outside the accepted set (415).
    #[error("Unsupported image type: {0}. Use JPEG, PNG or WebP")]
    UnsupportedMediaType(String),

    /// Body over the configured upload limit (413).
    #[error("Photo exceeds the upload limit")]
    PayloadTooLarge,

    /// Server-side fault (500). `public` is sent, `detail` is only logged.
    #[error("{public}")]
    Internal {
        public: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// Wraps a server-side fault behind a generic client message.
    pub fn internal(public: &'static str, detail: impl ToString) -> Self {
        Self::Internal {
            public,
            detail: detail.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::CountryNotFound => StatusCode::NOT_FOUND,
            Self::MissingPhoto => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { public, detail } = &self {
            tracing::error!(error = %detail, "{public}");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
