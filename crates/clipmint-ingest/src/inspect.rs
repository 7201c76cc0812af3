//! Offline inspection of a captured request body.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use clipmint_multipart::IngestError;
use thiserror::Error;
use uuid::Uuid;

use crate::receipt::UploadReceipt;

/// Why `inspect` could not produce a receipt.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The body file could not be read.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The content type was refused before parsing.
    #[error(transparent)]
    Rejected(#[from] IngestError),
}

/// Parse a body file as if it arrived with `content_type`.
pub fn inspect_file(
    content_type: &str,
    body_path: &Path,
    show_values: bool,
) -> Result<UploadReceipt, InspectError> {
    let body = std::fs::read(body_path).map_err(|source| InspectError::Io {
        path: body_path.to_path_buf(),
        source,
    })?;
    let ingestion =
        clipmint_multipart::parse_with_content_type(Some(content_type), Bytes::from(body))?;
    Ok(UploadReceipt::new(Uuid::now_v7(), &ingestion, show_values))
}
