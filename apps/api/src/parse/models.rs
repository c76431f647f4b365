//! Candidate record data model.
//!
//! Every scalar field is a `FieldValue`: either text the model actually
//! extracted, or a tagged `Fallback` reason. Fallbacks render as fixed
//! placeholder strings on the wire, but internally they are compared as enum
//! variants, so an extracted value that happens to spell out a placeholder
//! string can never be confused with a real fallback.

use serde::{Serialize, Serializer};

/// Closed set of fallback reasons. Each maps to exactly one placeholder
/// string; the validator restricts which reasons each field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    NameMissing,
    NotProvided,
    EmailMissing,
    PhoneMissing,
    EducationMissing,
    SkillsMissing,
    ProjectInfoUnavailable,
    ProjectSummaryMissing,
    SummaryMissing,
    NotAResume,
}

impl Fallback {
    /// The placeholder string this reason renders as.
    pub fn text(self) -> &'static str {
        match self {
            Fallback::NameMissing => "No name provided.",
            Fallback::NotProvided => "Not provided",
            Fallback::EmailMissing => "No email provided.",
            Fallback::PhoneMissing => "No phone number provided.",
            Fallback::EducationMissing => "No education information found.",
            Fallback::SkillsMissing => "No skills provided.",
            Fallback::ProjectInfoUnavailable => "Information not available",
            Fallback::ProjectSummaryMissing => "No project information provided.",
            Fallback::SummaryMissing => "No experience summary provided.",
            Fallback::NotAResume => "This document does not appear to be a valid resume.",
        }
    }
}

/// A single record field: extracted text or a tagged fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Extracted(String),
    Fallback(Fallback),
}

impl FieldValue {
    pub fn extracted(text: impl Into<String>) -> Self {
        FieldValue::Extracted(text.into())
    }

    /// The text this field renders as, placeholder included.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Extracted(text) => text,
            FieldValue::Fallback(fallback) => fallback.text(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FieldValue::Fallback(_))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: FieldValue,
    pub summary: FieldValue,
}

impl Project {
    /// The project entry substituted when the model produced none.
    pub fn placeholder() -> Self {
        Project {
            title: FieldValue::Fallback(Fallback::ProjectInfoUnavailable),
            summary: FieldValue::Fallback(Fallback::ProjectSummaryMissing),
        }
    }
}

/// The canonical output entity. Field order here is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeRecord {
    pub name: FieldValue,
    pub email: FieldValue,
    pub phone: FieldValue,
    pub education: Vec<FieldValue>,
    pub skills: Vec<FieldValue>,
    pub projects: Vec<Project>,
    pub experience_summary: FieldValue,
}

impl ResumeRecord {
    /// The single fixed record returned whenever the source document is
    /// judged not to be a resume.
    pub fn invalid_document() -> Self {
        ResumeRecord {
            name: FieldValue::Fallback(Fallback::NotProvided),
            email: FieldValue::Fallback(Fallback::NotProvided),
            phone: FieldValue::Fallback(Fallback::NotProvided),
            education: vec![FieldValue::Fallback(Fallback::EducationMissing)],
            skills: vec![FieldValue::Fallback(Fallback::SkillsMissing)],
            projects: vec![Project::placeholder()],
            experience_summary: FieldValue::Fallback(Fallback::NotAResume),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_serializes_as_placeholder_string() {
        let value = FieldValue::Fallback(Fallback::NameMissing);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            "\"No name provided.\""
        );
    }

    #[test]
    fn test_extracted_serializes_as_plain_string() {
        let value = FieldValue::extracted("Jane Doe");
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"Jane Doe\"");
    }

    #[test]
    fn test_extracted_placeholder_text_is_not_a_fallback() {
        // Same rendered text, different identity.
        let extracted = FieldValue::extracted("Not provided");
        let fallback = FieldValue::Fallback(Fallback::NotProvided);
        assert_eq!(extracted.as_str(), fallback.as_str());
        assert_ne!(extracted, fallback);
        assert!(!extracted.is_fallback());
    }

    #[test]
    fn test_record_serializes_in_wire_field_order() {
        let json = serde_json::to_string(&ResumeRecord::invalid_document()).unwrap();
        let positions: Vec<usize> = [
            "\"name\"",
            "\"email\"",
            "\"phone\"",
            "\"education\"",
            "\"skills\"",
            "\"projects\"",
            "\"experience_summary\"",
        ]
        .iter()
        .map(|field| json.find(field).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_invalid_document_record_shape() {
        let record = ResumeRecord::invalid_document();
        assert_eq!(record.education.len(), 1);
        assert_eq!(record.skills.len(), 1);
        assert_eq!(record.projects.len(), 1);
        assert_eq!(
            record.experience_summary.as_str(),
            "This document does not appear to be a valid resume."
        );
    }
}
