//! RFC 9457 Problem Details error responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use clipmint_multipart::IngestError;
use serde::Serialize;

/// RFC 9457 Problem Details response.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    /// Create a 400 Bad Request error.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            error_type: "urn:clipmint:error:bad-request".into(),
            title: "Bad Request".into(),
            status: 400,
            detail: Some(detail.into()),
        }
    }

    /// Create a 413 Payload Too Large error.
    pub fn payload_too_large(detail: impl Into<String>) -> Self {
        Self {
            error_type: "urn:clipmint:error:payload-too-large".into(),
            title: "Payload Too Large".into(),
            status: 413,
            detail: Some(detail.into()),
        }
    }

    /// Create a 415 Unsupported Media Type error.
    pub fn unsupported_media_type(detail: impl Into<String>) -> Self {
        Self {
            error_type: "urn:clipmint:error:unsupported-media-type".into(),
            title: "Unsupported Media Type".into(),
            status: 415,
            detail: Some(detail.into()),
        }
    }

    /// Create a 500 Internal Server Error.
    pub fn internal_error() -> Self {
        Self {
            error_type: "urn:clipmint:error:internal-error".into(),
            title: "Internal Server Error".into(),
            status: 500,
            detail: None,
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Json(&self).into_response();
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

impl From<IngestError> for ProblemDetails {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnsupportedContentType { .. } => {
                Self::unsupported_media_type(err.to_string())
            }
            IngestError::MissingBoundary => Self::bad_request(err.to_string()),
        }
    }
}
