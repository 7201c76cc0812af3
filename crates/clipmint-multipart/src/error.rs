use thiserror::Error;

/// Errors that reject an upload before its body is looked at.
///
/// These are the only failures that cross the crate boundary; both map to
/// client errors in the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Content-Type is absent or does not declare `multipart/form-data`.
    #[error("unsupported content type {}: expected multipart/form-data", .found.as_deref().unwrap_or("<none>"))]
    UnsupportedContentType { found: Option<String> },

    /// Multipart was declared but the `boundary` parameter is absent or empty.
    #[error("multipart boundary is not found in Content-Type")]
    MissingBoundary,
}

/// Reasons the body parser gave up on a multipart body.
///
/// Always recovered from: the caller wraps the raw body in the fallback
/// envelope and keeps this value as the degradation cause. `part` is the
/// zero-based index of the part being read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedMultipart {
    /// The `--boundary` delimiter does not occur at the start of any line.
    #[error("no boundary delimiter found in body")]
    NoDelimiter,

    /// Something other than a line break or `--` follows a delimiter.
    #[error("part {part}: delimiter is not followed by a line break")]
    BadDelimiterLine { part: usize },

    /// The header block never reaches a blank line.
    #[error("part {part}: header block is not terminated by a blank line")]
    UnterminatedHeaders { part: usize },

    /// A header line is not valid UTF-8.
    #[error("part {part}: header line is not valid UTF-8")]
    InvalidHeaderEncoding { part: usize },

    /// The part carries no `Content-Disposition` header.
    #[error("part {part}: missing Content-Disposition header")]
    MissingContentDisposition { part: usize },

    /// `Content-Disposition` has no usable `name` parameter.
    #[error("part {part}: Content-Disposition has no name parameter")]
    MissingName { part: usize },

    /// The body ends before the part is closed by another delimiter.
    #[error("part {part}: body ends before the next boundary delimiter")]
    Truncated { part: usize },
}
