// Resume parsing pipeline.
// Implements: prompt construction, model output normalization, tolerant JSON
// repair, field sanitization, invalid-document detection, schema validation.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod detect;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod repair;
pub mod sanitize;
pub mod schema;

use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::parse::models::ResumeRecord;

/// Runs the full normalization and validation pipeline over raw model
/// output: normalize -> repair -> sanitize -> detect -> validate.
/// Sequential, stateless, no retries.
pub fn process_model_output(raw: &str) -> Result<ResumeRecord, AppError> {
    let flattened = normalize::flatten_model_output(raw);
    let parsed = repair::parse_lenient(&flattened).map_err(|_| AppError::UnparseableOutput {
        raw_output: raw.to_string(),
    })?;
    let candidate = sanitize::sanitize_payload(&parsed);
    let screened = detect::screen_invalid_document(candidate);
    schema::validate_record(screened)
}

/// Extracts a structured candidate record from resume text via the model.
/// The text must be non-empty after whitespace normalization — the model is
/// never invoked for an empty document.
pub async fn parse_resume(
    resume_text: &str,
    llm: &dyn CompletionModel,
) -> Result<ResumeRecord, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::EmptyDocument(
            "Could not extract text from resume".to_string(),
        ));
    }

    let prompt = prompts::build_resume_prompt(resume_text);
    let raw = llm
        .complete(prompt.system, &prompt.user)
        .await
        .map_err(|e| AppError::ModelUnavailable(e.to_string()))?;

    process_model_output(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::parse::models::{Fallback, FieldValue};
    use async_trait::async_trait;

    struct StaticModel(&'static str);

    #[async_trait]
    impl CompletionModel for StaticModel {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct DownModel;

    #[async_trait]
    impl CompletionModel for DownModel {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    const FENCED_COMPLETE: &str = "```json\n{\"name\":\"Jane Doe\",\"email\":\"jane@x.com\",\
        \"phone\":\"555-0100\",\"education\":[\"BS CS\"],\"skills\":[\"Go\"],\
        \"projects\":[{\"title\":\"T\",\"summary\":\"Built a thing over several months.\"}],\
        \"experience_summary\":\"Jane has five years of backend experience across two companies.\"}\n```";

    #[test]
    fn test_fenced_complete_output_passes_through_unchanged() {
        let record = process_model_output(FENCED_COMPLETE).unwrap();
        assert_eq!(record.name, FieldValue::extracted("Jane Doe"));
        assert_eq!(record.skills, vec![FieldValue::extracted("Go")]);
        assert_eq!(
            record.experience_summary,
            FieldValue::extracted(
                "Jane has five years of backend experience across two companies."
            )
        );
    }

    #[test]
    fn test_near_json_is_repaired_and_backfilled() {
        let record = process_model_output("{name: 'Jane', email: 'jane@x.com',}").unwrap();
        assert_eq!(record.name, FieldValue::extracted("Jane"));
        assert_eq!(record.email, FieldValue::extracted("jane@x.com"));
        assert_eq!(record.phone, FieldValue::Fallback(Fallback::PhoneMissing));
        assert_eq!(
            record.education,
            vec![FieldValue::Fallback(Fallback::EducationMissing)]
        );
        assert_ne!(record, ResumeRecord::invalid_document());
    }

    #[test]
    fn test_prose_output_is_unparseable() {
        let err = process_model_output("I'm sorry, I cannot process this file.").unwrap_err();
        assert!(matches!(err, AppError::UnparseableOutput { .. }));
    }

    #[test]
    fn test_all_placeholder_output_becomes_canonical_invalid_record() {
        let raw = r#"{
            "name": "Not provided",
            "email": "Not provided",
            "phone": "Not provided",
            "education": ["No education information found."],
            "skills": ["No skills provided."],
            "projects": [{"title": "Information not available", "summary": "No project information provided."}],
            "experience_summary": "This document does not appear to be a valid resume."
        }"#;
        let record = process_model_output(raw).unwrap();
        assert_eq!(record, ResumeRecord::invalid_document());
    }

    #[test]
    fn test_rejection_phrase_overrides_real_looking_fields() {
        let raw = r#"{
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": "555-0100",
            "education": ["BS CS"],
            "skills": ["Go"],
            "projects": [{"title": "T", "summary": "Built a thing over several months."}],
            "experience_summary": "Clearly this document does not appear to be a valid resume at all."
        }"#;
        let record = process_model_output(raw).unwrap();
        assert_eq!(record, ResumeRecord::invalid_document());
    }

    #[test]
    fn test_scalar_output_collapses_to_canonical_invalid_record() {
        // A bare JSON scalar parses strictly, sanitizes to all-fallback,
        // and the detector normalizes it.
        let record = process_model_output("42").unwrap();
        assert_eq!(record, ResumeRecord::invalid_document());
    }

    #[tokio::test]
    async fn test_parse_resume_end_to_end_with_stub_model() {
        let record = parse_resume("Jane Doe. Backend engineer.", &StaticModel(FENCED_COMPLETE))
            .await
            .unwrap();
        assert_eq!(record.name, FieldValue::extracted("Jane Doe"));
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_empty_text_before_model_call() {
        let err = parse_resume("   ", &StaticModel(FENCED_COMPLETE))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyDocument(_)));
    }

    #[tokio::test]
    async fn test_model_failure_maps_to_model_unavailable() {
        let err = parse_resume("Jane Doe. Backend engineer.", &DownModel)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ModelUnavailable(_)));
    }
}
