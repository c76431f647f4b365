//! Final structural gate over the candidate record.
//!
//! Re-asserts every per-field constraint after sanitization and detection.
//! Extracted text must satisfy the field's semantic rule; a fallback must
//! belong to the field's closed set of reasons. Violations are collected and
//! reported together rather than failing on the first.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;
use crate::parse::models::{Fallback, FieldValue, ResumeRecord};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"));

const PHONE_MIN_LEN: usize = 5;
const SUMMARY_MIN_LEN: usize = 10;
const PROJECT_SUMMARY_MIN_LEN: usize = 10;

const NAME_FALLBACKS: &[Fallback] = &[Fallback::NameMissing, Fallback::NotProvided];
const EMAIL_FALLBACKS: &[Fallback] = &[Fallback::EmailMissing, Fallback::NotProvided];
const PHONE_FALLBACKS: &[Fallback] = &[Fallback::PhoneMissing, Fallback::NotProvided];
const EDUCATION_FALLBACKS: &[Fallback] = &[Fallback::EducationMissing];
const SKILLS_FALLBACKS: &[Fallback] = &[Fallback::SkillsMissing];
const PROJECT_TITLE_FALLBACKS: &[Fallback] = &[Fallback::ProjectInfoUnavailable];
const PROJECT_SUMMARY_FALLBACKS: &[Fallback] = &[Fallback::ProjectSummaryMissing];
const SUMMARY_FALLBACKS: &[Fallback] = &[Fallback::SummaryMissing, Fallback::NotAResume];

/// Validates the record against the full schema. On success the record is
/// the immutable validated payload; on failure every violation is joined
/// into a single message.
pub fn validate_record(record: ResumeRecord) -> Result<ResumeRecord, AppError> {
    let mut violations: Vec<String> = Vec::new();

    check_field(
        &mut violations,
        "name",
        &record.name,
        NAME_FALLBACKS,
        |text| !text.trim().is_empty(),
        "Name is required",
    );
    check_field(
        &mut violations,
        "email",
        &record.email,
        EMAIL_FALLBACKS,
        |text| EMAIL_RE.is_match(text.trim()),
        "Must be a valid email address",
    );
    check_field(
        &mut violations,
        "phone",
        &record.phone,
        PHONE_FALLBACKS,
        |text| text.trim().chars().count() >= PHONE_MIN_LEN,
        "Phone number is required",
    );

    if record.education.is_empty() {
        violations.push("education: Include at least one education entry".to_string());
    }
    for entry in &record.education {
        check_field(
            &mut violations,
            "education",
            entry,
            EDUCATION_FALLBACKS,
            |text| !text.trim().is_empty(),
            "Entries must be non-empty",
        );
    }

    if record.skills.is_empty() {
        violations.push("skills: Include at least one skill".to_string());
    }
    for entry in &record.skills {
        check_field(
            &mut violations,
            "skills",
            entry,
            SKILLS_FALLBACKS,
            |text| !text.trim().is_empty(),
            "Entries must be non-empty",
        );
    }

    if record.projects.is_empty() {
        violations.push("projects: Include at least one project entry".to_string());
    }
    for project in &record.projects {
        check_field(
            &mut violations,
            "projects.title",
            &project.title,
            PROJECT_TITLE_FALLBACKS,
            |text| !text.trim().is_empty(),
            "Project title is required",
        );
        check_field(
            &mut violations,
            "projects.summary",
            &project.summary,
            PROJECT_SUMMARY_FALLBACKS,
            |text| text.trim().chars().count() >= PROJECT_SUMMARY_MIN_LEN,
            "Project summary should describe the work",
        );
    }

    check_field(
        &mut violations,
        "experience_summary",
        &record.experience_summary,
        SUMMARY_FALLBACKS,
        |text| text.trim().chars().count() >= SUMMARY_MIN_LEN,
        "Experience summary should be descriptive",
    );

    if violations.is_empty() {
        Ok(record)
    } else {
        Err(AppError::SchemaViolation(violations.join("; ")))
    }
}

fn check_field(
    violations: &mut Vec<String>,
    field: &str,
    value: &FieldValue,
    allowed: &[Fallback],
    rule: impl Fn(&str) -> bool,
    reason: &str,
) {
    match value {
        FieldValue::Extracted(text) => {
            if !rule(text) {
                violations.push(format!("{field}: {reason}"));
            }
        }
        FieldValue::Fallback(fallback) => {
            if !allowed.contains(fallback) {
                violations.push(format!("{field}: Unexpected fallback value"));
            }
        }
    }
}
