//! Invalid-document detection.
//!
//! Two independent signals mark a sanitized record as "not a resume": the
//! experience summary carries the rejection phrase, or every field collapsed
//! to its fallback. Either one replaces the candidate with the canonical
//! invalid-document record, so downstream callers never see a partial
//! rejection state.
//!
//! Both signals are heuristics. A model that paraphrases its rejection into
//! different wording while keeping one plausible-looking field evades both
//! checks; see DESIGN.md for why that false negative is accepted.

use crate::parse::models::{FieldValue, ResumeRecord};

/// The phrase models are instructed to emit for non-resume documents.
const REJECTION_PHRASE: &str = "does not appear to be a valid resume";

/// Pure classification: returns the canonical invalid-document record when
/// either rejection signal fires, otherwise the candidate unchanged.
pub fn screen_invalid_document(record: ResumeRecord) -> ResumeRecord {
    if summary_signals_rejection(&record.experience_summary) || is_all_fallback(&record) {
        return ResumeRecord::invalid_document();
    }
    record
}

fn summary_signals_rejection(summary: &FieldValue) -> bool {
    summary.as_str().to_lowercase().contains(REJECTION_PHRASE)
}

fn is_all_fallback(record: &ResumeRecord) -> bool {
    record.name.is_fallback()
        && record.email.is_fallback()
        && record.phone.is_fallback()
        && record.experience_summary.is_fallback()
        && is_single_fallback(&record.education)
        && is_single_fallback(&record.skills)
        && matches!(
            record.projects.as_slice(),
            [project] if project.title.is_fallback() && project.summary.is_fallback()
        )
}

fn is_single_fallback(entries: &[FieldValue]) -> bool {
    matches!(entries, [entry] if entry.is_fallback())
}
