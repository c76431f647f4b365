use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{ensure_pdf_upload, extract_text, UploadedDocument};
use crate::parse::models::ResumeRecord;
use crate::parse::parse_resume;
use crate::state::AppState;

/// POST /api/v1/resumes/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    let request_id = Uuid::new_v4();

    let document = read_upload(&mut multipart).await?;
    ensure_pdf_upload(&document, state.config.max_upload_mb)?;

    let resume_text = extract_text(&document.data)?;
    info!(
        %request_id,
        filename = %document.filename,
        text_len = resume_text.len(),
        "Extracted resume text"
    );

    let record = parse_resume(&resume_text, state.llm.as_ref()).await?;
    info!(%request_id, "Resume parsed and validated");

    Ok(Json(record))
}

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("resume.pdf").to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::Validation("Invalid file".to_string()))?;
            return Ok(UploadedDocument {
                filename,
                content_type,
                data,
            });
        }
    }

    Err(AppError::Validation("File is required".to_string()))
}
