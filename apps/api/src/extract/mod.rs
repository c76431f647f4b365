//! Upload gating and PDF text extraction.
//!
//! Thin boundary in front of the parsing pipeline: rejects anything that is
//! not a reasonably-sized PDF, then pulls plain text out of the bytes. The
//! pipeline itself never sees the file, only the extracted text.

use bytes::Bytes;

use crate::errors::AppError;

/// One uploaded file as read from the multipart form.
#[derive(Debug)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Validates the uploaded file: must be a non-empty PDF within the size cap.
pub fn ensure_pdf_upload(document: &UploadedDocument, max_upload_mb: u64) -> Result<(), AppError> {
    let is_pdf = document.content_type.as_deref() == Some("application/pdf")
        || document.filename.to_lowercase().ends_with(".pdf");
    if !is_pdf {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }
    if document.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if document.data.len() as u64 > max_upload_mb * 1024 * 1024 {
        return Err(AppError::Validation(format!(
            "Uploaded file exceeds {max_upload_mb}MB limit"
        )));
    }
    Ok(())
}

/// Extracts plain text from PDF bytes, collapsing all whitespace runs to
/// single spaces. A PDF with no extractable text is an empty document, not
/// an extraction failure.
pub fn extract_text(data: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::Validation(format!("Could not read PDF file: {e}")))?;

    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return Err(AppError::EmptyDocument(
            "Could not extract text from resume".to_string(),
        ));
    }
    Ok(cleaned)
}
