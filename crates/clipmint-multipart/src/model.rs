//! Parsed upload data handed to downstream collaborators.

use std::collections::HashMap;

use bytes::Bytes;

/// Media type assumed for file parts that declare none (RFC 7578 §4.4).
pub const DEFAULT_FILE_MEDIA_TYPE: &str = "application/octet-stream";

/// One uploaded binary attachment.
///
/// `name` and `media_type` come straight from the client and are untrusted;
/// `name` in particular must never be used as a storage path.
///
/// `data` is a reference-counted slice of the request body, so the request
/// buffer stays alive for as long as any part points into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    name: String,
    media_type: String,
    data: Bytes,
}

impl FilePart {
    /// Create a file part.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// Client-supplied file name (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Client-declared content type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Size of the payload in bytes.
    pub fn byte_length(&self) -> usize {
        self.data.len()
    }

    /// The payload.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consume the part and return its payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

/// The parser's output: text fields and file parts keyed by form field name.
///
/// A name is present in at most one of the two maps. Values are fixed once
/// the upload is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUpload {
    fields: HashMap<String, String>,
    files: HashMap<String, FilePart>,
}

impl ParsedUpload {
    /// Start building an upload.
    pub fn builder() -> UploadBuilder {
        UploadBuilder::default()
    }

    /// All text fields.
    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    /// All file parts.
    pub fn files(&self) -> &HashMap<String, FilePart> {
        &self.files
    }

    /// Look up a text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Look up a file part.
    pub fn file(&self, name: &str) -> Option<&FilePart> {
        self.files.get(name)
    }

    /// Sum of all file payload sizes.
    pub fn total_file_bytes(&self) -> usize {
        self.files.values().map(FilePart::byte_length).sum()
    }

    /// Split into the field and file maps.
    pub fn into_parts(self) -> (HashMap<String, String>, HashMap<String, FilePart>) {
        (self.fields, self.files)
    }
}

/// Accumulates parts in body order.
///
/// Last write wins per name, across both kinds: inserting a field removes a
/// file of the same name and vice versa.
#[derive(Debug, Default)]
pub struct UploadBuilder {
    upload: ParsedUpload,
}

impl UploadBuilder {
    /// Record a text field.
    pub fn field(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.upload.files.remove(&name);
        self.upload.fields.insert(name, value.into());
        self
    }

    /// Record a file part.
    pub fn file(&mut self, name: impl Into<String>, part: FilePart) -> &mut Self {
        let name = name.into();
        self.upload.fields.remove(&name);
        self.upload.files.insert(name, part);
        self
    }

    /// Finish building.
    pub fn build(self) -> ParsedUpload {
        self.upload
    }
}
