use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use uuid::Uuid;

use crate::api::{error::ApiError, extract::ApiPath, state::AppState};
use crate::application::{DocumentService, UploadOutcome};
use crate::domain::DomainError;

const FILE_FIELD: &str = "file";

/// Replaces the session's document with the uploaded PDF (multipart field `file`).
pub async fn upload_document(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadOutcome>, ApiError> {
    let mut multipart = multipart?;
    let handle = state.session(id).await?;
    let (name, bytes) = read_pdf_field(&mut multipart).await?;

    let mut session = handle.lock().await;
    let outcome = state.chat.upload(&mut session, &name, bytes).await?;
    Ok(Json(outcome))
}

async fn read_pdf_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), DomainError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        DocumentService::ensure_pdf(field.content_type(), field.file_name())?;
        let name = field.file_name().unwrap_or("document.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DomainError::validation(format!("failed to read upload: {e}")))?;

        return Ok((name, bytes.to_vec()));
    }

    Err(DomainError::validation(format!(
        "missing multipart field `{FILE_FIELD}`"
    )))
}
