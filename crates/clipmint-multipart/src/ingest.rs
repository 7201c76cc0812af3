//! Entry point used by the HTTP layer.
//!
//! Boundary extraction, then body parsing, then the fallback envelope when
//! the body cannot be parsed. Only content-type problems are errors; a body
//! that fails to parse still yields an [`Ingestion`], marked degraded.

use bytes::Bytes;
use clipmint_telemetry::{log_upload_parsed, log_upload_rejected};
use http::header::CONTENT_TYPE;
use http::HeaderMap;

use crate::content_type::extract_boundary;
use crate::error::{IngestError, MalformedMultipart};
use crate::fallback::fallback_envelope;
use crate::model::ParsedUpload;
use crate::parser::MultipartParser;

/// Why an upload was wrapped in the fallback envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degradation {
    cause: MalformedMultipart,
}

impl Degradation {
    /// The parse failure that triggered the fallback.
    pub fn cause(&self) -> &MalformedMultipart {
        &self.cause
    }
}

/// Result of ingesting one request body.
#[derive(Debug, Clone)]
pub struct Ingestion {
    upload: ParsedUpload,
    degradation: Option<Degradation>,
}

impl Ingestion {
    /// The parsed (or fallback) upload.
    pub fn upload(&self) -> &ParsedUpload {
        &self.upload
    }

    /// Take the upload.
    pub fn into_upload(self) -> ParsedUpload {
        self.upload
    }

    /// Whether the fallback envelope was used.
    pub fn is_degraded(&self) -> bool {
        self.degradation.is_some()
    }

    /// Details of the fallback, if it was used.
    pub fn degradation(&self) -> Option<&Degradation> {
        self.degradation.as_ref()
    }
}

/// Parse an upload from request headers and the buffered body.
///
/// A `Content-Type` value carrying non-ASCII bytes (obs-text) is decoded
/// lossily, so a multipart declaration with an odd parameter still parses.
pub fn parse(headers: &HeaderMap, body: Bytes) -> Result<Ingestion, IngestError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()));
    parse_with_content_type(content_type.as_deref(), body)
}

/// Parse an upload from a raw Content-Type value and the buffered body.
pub fn parse_with_content_type(
    content_type: Option<&str>,
    body: Bytes,
) -> Result<Ingestion, IngestError> {
    let boundary = extract_boundary(content_type).inspect_err(|e| {
        log_upload_rejected!(reason = %e, body_bytes = body.len(), "upload rejected");
    })?;

    match MultipartParser::new(&boundary).parse(&body) {
        Ok(upload) => {
            log_upload_parsed!(
                fields = upload.fields().len(),
                files = upload.files().len(),
                file_bytes = upload.total_file_bytes(),
                "multipart upload parsed"
            );
            Ok(Ingestion {
                upload,
                degradation: None,
            })
        }
        Err(cause) => {
            let upload = fallback_envelope(body, &cause);
            Ok(Ingestion {
                upload,
                degradation: Some(Degradation { cause }),
            })
        }
    }
}
