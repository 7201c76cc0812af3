//! Upload ingestion handler.

use axum::{
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::error::ProblemDetails;
use crate::receipt::UploadReceipt;

/// POST /uploads - Ingest a multipart video upload
///
/// The body is read whole and handed to the multipart parser as raw bytes.
/// Parsing and hashing run on the blocking pool since both are linear in
/// the body size.
pub async fn ingest_upload(
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<UploadReceipt>), ProblemDetails> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProblemDetails::payload_too_large(rejection.body_text())
        } else {
            ProblemDetails::bad_request(rejection.body_text())
        }
    })?;

    let upload_id = Uuid::now_v7();
    let receipt = tokio::task::spawn_blocking(move || {
        let ingestion = clipmint_multipart::parse(&headers, body)?;
        Ok::<_, ProblemDetails>(UploadReceipt::new(upload_id, &ingestion, false))
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, %upload_id, "upload parse task failed");
        ProblemDetails::internal_error()
    })??;

    tracing::info!(
        %upload_id,
        degraded = receipt.degraded,
        files = receipt.files.len(),
        fields = receipt.fields.len(),
        "upload ingested"
    );

    Ok((StatusCode::CREATED, Json(receipt)))
}
