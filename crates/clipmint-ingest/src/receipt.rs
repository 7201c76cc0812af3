//! Summary of an ingested upload, returned to clients and printed by `inspect`.

use std::collections::BTreeMap;

use clipmint_multipart::{FilePart, Ingestion};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UploadReceipt {
    pub upload_id: Uuid,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degradation_reason: Option<String>,
    pub fields: BTreeMap<String, FieldSummary>,
    pub files: BTreeMap<String, FileSummary>,
}

#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub media_type: String,
    pub size: usize,
    pub sha256: String,
}

impl UploadReceipt {
    /// Summarize an ingestion. Field values are only echoed when
    /// `include_values` is set.
    pub fn new(upload_id: Uuid, ingestion: &Ingestion, include_values: bool) -> Self {
        let upload = ingestion.upload();

        let fields = upload
            .fields()
            .iter()
            .map(|(name, value)| {
                let summary = FieldSummary {
                    length: value.len(),
                    value: include_values.then(|| value.clone()),
                };
                (name.clone(), summary)
            })
            .collect();

        let files = upload
            .files()
            .iter()
            .map(|(name, part)| (name.clone(), FileSummary::from(part)))
            .collect();

        Self {
            upload_id,
            degraded: ingestion.is_degraded(),
            degradation_reason: ingestion.degradation().map(|d| d.cause().to_string()),
            fields,
            files,
        }
    }
}

impl From<&FilePart> for FileSummary {
    fn from(part: &FilePart) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(part.data());
        Self {
            name: part.name().to_string(),
            media_type: part.media_type().to_string(),
            size: part.byte_length(),
            sha256: hex::encode(hasher.finalize()),
        }
    }
}
