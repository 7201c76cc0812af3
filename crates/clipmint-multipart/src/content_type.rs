//! Content-Type validation and boundary extraction.

use crate::error::IngestError;

/// The only media type accepted for uploads.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Validate a declared Content-Type and return its boundary token.
///
/// Format: `multipart/form-data; boundary=----WebKitFormBoundary...`
///
/// The media type match is case-insensitive and only requires the value to
/// contain `multipart/form-data`. A quoted boundary (`boundary="abc"`) is
/// returned without its quotes; anything else is returned verbatim.
pub fn extract_boundary(content_type: Option<&str>) -> Result<String, IngestError> {
    let Some(content_type) = content_type else {
        return Err(IngestError::UnsupportedContentType { found: None });
    };

    if !content_type
        .to_ascii_lowercase()
        .contains(MULTIPART_FORM_DATA)
    {
        return Err(IngestError::UnsupportedContentType {
            found: Some(content_type.to_string()),
        });
    }

    for param in content_type.split(';').skip(1) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        if !key.trim().eq_ignore_ascii_case("boundary") {
            continue;
        }
        let boundary = unquote(value.trim());
        if boundary.is_empty() {
            return Err(IngestError::MissingBoundary);
        }
        return Ok(boundary.to_string());
    }

    Err(IngestError::MissingBoundary)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
