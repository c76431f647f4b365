//! Field sanitization.
//!
//! Walks the untyped parsed value and coerces each expected field to its
//! canonical type, substituting the field's fallback when a value is
//! absent, wrong-typed, or too short to be meaningful. Total: always
//! terminates with a structurally complete record.

use serde_json::Value;

use crate::parse::models::{Fallback, FieldValue, Project, ResumeRecord};

const NAME_MIN_LEN: usize = 2;
const CONTACT_MIN_LEN: usize = 5;
const SUMMARY_MIN_LEN: usize = 30;
const PROJECT_TITLE_MIN_LEN: usize = 1;
const PROJECT_SUMMARY_MIN_LEN: usize = 10;

/// Sanitizes the parsed model payload into a complete candidate record.
/// Non-object input is treated as an empty mapping, which collapses every
/// field to its fallback.
pub fn sanitize_payload(value: &Value) -> ResumeRecord {
    let empty = serde_json::Map::new();
    let map = value.as_object().unwrap_or(&empty);

    ResumeRecord {
        name: sanitize_field(
            map.get("name"),
            NAME_MIN_LEN,
            Fallback::NameMissing,
            &[Fallback::NameMissing, Fallback::NotProvided],
        ),
        email: sanitize_field(
            map.get("email"),
            CONTACT_MIN_LEN,
            Fallback::EmailMissing,
            &[Fallback::EmailMissing, Fallback::NotProvided],
        ),
        phone: sanitize_field(
            map.get("phone"),
            CONTACT_MIN_LEN,
            Fallback::PhoneMissing,
            &[Fallback::PhoneMissing, Fallback::NotProvided],
        ),
        education: sanitize_entries(map.get("education"), Fallback::EducationMissing),
        skills: sanitize_entries(map.get("skills"), Fallback::SkillsMissing),
        projects: sanitize_projects(map.get("projects")),
        experience_summary: sanitize_field(
            map.get("experience_summary"),
            SUMMARY_MIN_LEN,
            Fallback::SummaryMissing,
            &[Fallback::SummaryMissing, Fallback::NotAResume],
        ),
    }
}

fn sanitize_field(
    value: Option<&Value>,
    min_len: usize,
    substitute: Fallback,
    sentinels: &[Fallback],
) -> FieldValue {
    sanitize_text(value.and_then(Value::as_str), min_len, substitute, sentinels)
}

/// Core per-field rule: a string that spells out one of the field's own
/// placeholder texts is tagged as that fallback (the model echoed the rule
/// it was given); otherwise the trimmed text must meet the field's minimum
/// length to count as extracted.
fn sanitize_text(
    text: Option<&str>,
    min_len: usize,
    substitute: Fallback,
    sentinels: &[Fallback],
) -> FieldValue {
    let Some(text) = text else {
        return FieldValue::Fallback(substitute);
    };
    let trimmed = text.trim();

    if let Some(&known) = sentinels.iter().find(|s| s.text() == trimmed) {
        return FieldValue::Fallback(known);
    }
    if trimmed.chars().count() >= min_len {
        FieldValue::Extracted(trimmed.to_string())
    } else {
        FieldValue::Fallback(substitute)
    }
}

/// Keeps only string elements, trimmed and non-empty. An empty result
/// becomes a single-element fallback sequence — the record never carries an
/// empty collection.
fn sanitize_entries(value: Option<&Value>, substitute: Fallback) -> Vec<FieldValue> {
    let entries: Vec<FieldValue> = value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(|text| {
                    if text == substitute.text() {
                        FieldValue::Fallback(substitute)
                    } else {
                        FieldValue::Extracted(text.to_string())
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    if entries.is_empty() {
        vec![FieldValue::Fallback(substitute)]
    } else {
        entries
    }
}

fn sanitize_projects(value: Option<&Value>) -> Vec<Project> {
    let projects: Vec<Project> = value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(sanitize_project_entry).collect())
        .unwrap_or_default();

    if projects.is_empty() {
        vec![Project::placeholder()]
    } else {
        projects
    }
}

fn sanitize_project_entry(value: &Value) -> Option<Project> {
    match value {
        Value::Object(map) => Some(Project {
            title: sanitize_field(
                map.get("title"),
                PROJECT_TITLE_MIN_LEN,
                Fallback::ProjectInfoUnavailable,
                &[Fallback::ProjectInfoUnavailable],
            ),
            summary: sanitize_field(
                map.get("summary"),
                PROJECT_SUMMARY_MIN_LEN,
                Fallback::ProjectSummaryMissing,
                &[Fallback::ProjectSummaryMissing],
            ),
        }),
        // A bare string is a title with no summary to offer.
        Value::String(title) => Some(Project {
            title: sanitize_text(
                Some(title),
                PROJECT_TITLE_MIN_LEN,
                Fallback::ProjectInfoUnavailable,
                &[Fallback::ProjectInfoUnavailable],
            ),
            summary: FieldValue::Fallback(Fallback::ProjectSummaryMissing),
        }),
        _ => None,
    }
}
