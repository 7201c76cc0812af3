//! Multipart ingestion for clipmint video uploads.
//!
//! Turns a buffered `multipart/form-data` request body into a
//! [`ParsedUpload`] of text fields and file parts. When the body cannot be
//! parsed, the raw bytes are kept as a single `video` file instead of being
//! dropped, and the result is marked degraded.
//!
//! ```
//! use bytes::Bytes;
//!
//! let body = Bytes::from_static(
//!     b"--b\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nHello\r\n--b--\r\n",
//! );
//! let ingestion =
//!     clipmint_multipart::parse_with_content_type(Some("multipart/form-data; boundary=b"), body)
//!         .unwrap();
//! assert_eq!(ingestion.upload().field("title"), Some("Hello"));
//! assert!(!ingestion.is_degraded());
//! ```

pub mod content_type;
pub mod error;
pub mod fallback;
pub mod ingest;
pub mod model;
pub mod parser;

pub use content_type::{extract_boundary, MULTIPART_FORM_DATA};
pub use error::{IngestError, MalformedMultipart};
pub use fallback::{
    fallback_envelope, FALLBACK_FILE_FIELD, FALLBACK_METADATA, FALLBACK_METADATA_FIELD,
    FALLBACK_VIDEO_MEDIA_TYPE, FALLBACK_VIDEO_NAME,
};
pub use ingest::{parse, parse_with_content_type, Degradation, Ingestion};
pub use model::{FilePart, ParsedUpload, UploadBuilder, DEFAULT_FILE_MEDIA_TYPE};
pub use parser::MultipartParser;
