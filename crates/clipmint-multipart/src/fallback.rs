//! Fallback envelope for bodies the parser could not split.
//!
//! The whole request body, framing included, is kept as a single `video`
//! file so the upload is never lost. Consumers should check
//! [`Ingestion::is_degraded`](crate::Ingestion::is_degraded) rather than
//! matching on these defaults.

use bytes::Bytes;
use clipmint_telemetry::log_upload_degraded;

use crate::error::MalformedMultipart;
use crate::model::{FilePart, ParsedUpload};

/// Field name carrying the raw body.
pub const FALLBACK_FILE_FIELD: &str = "video";

/// Field name carrying the placeholder metadata.
pub const FALLBACK_METADATA_FIELD: &str = "metadata";

/// Placeholder metadata: an empty JSON object.
pub const FALLBACK_METADATA: &str = "{}";

/// File name given to the raw body.
pub const FALLBACK_VIDEO_NAME: &str = "uploaded_video.mp4";

/// Media type given to the raw body.
pub const FALLBACK_VIDEO_MEDIA_TYPE: &str = "video/mp4";

/// Wrap the entire body as the `video` file. Never fails.
pub fn fallback_envelope(body: Bytes, cause: &MalformedMultipart) -> ParsedUpload {
    log_upload_degraded!(
        cause = %cause,
        body_bytes = body.len(),
        "multipart body could not be parsed, keeping raw body as video"
    );

    let mut builder = ParsedUpload::builder();
    builder
        .field(FALLBACK_METADATA_FIELD, FALLBACK_METADATA)
        .file(
            FALLBACK_FILE_FIELD,
            FilePart::new(FALLBACK_VIDEO_NAME, FALLBACK_VIDEO_MEDIA_TYPE, body),
        );
    builder.build()
}
