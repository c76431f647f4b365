// All LLM prompt constants for resume parsing.
// The fallback strings in the template are the exact placeholder texts the
// sanitizer and detector recognize — keep them in sync with `models.rs`.

/// System prompt for resume extraction — enforces JSON-only output.
pub const RESUME_PARSE_SYSTEM: &str =
    "You are an AI resume parser that extracts structured candidate information. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume extraction prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"From this resume text, return pure JSON with the following fields:
- name: string
- email: string
- phone: string
- education: string[]
- skills: string[]
- projects: [{"title": string, "summary": string}]
- experience_summary: string (3-5 sentences)
The response must be valid JSON only, without commentary or markdown.

Rules:
- If a field is missing or unclear, provide a helpful fallback message such as "No skills provided." or "No education information found."
- Always return non-empty arrays for education, skills, and projects. Use a single descriptive entry when the resume lacks that section.
- If the document is not a resume or contains irrelevant content, return exactly:
  {
    "name": "Not provided",
    "email": "Not provided",
    "phone": "Not provided",
    "education": ["No education information found."],
    "skills": ["No skills provided."],
    "projects": [{"title": "Information not available", "summary": "No project information provided."}],
    "experience_summary": "This document does not appear to be a valid resume."
  }
- Never include code fences, markdown, or explanatory text. Return JSON only.

Resume:
{resume_text}"#;

/// The instruction pair sent to the model for one parse request.
#[derive(Debug)]
pub struct ResumePrompt {
    pub system: &'static str,
    pub user: String,
}

/// Pure function: substitutes the source text at the single placeholder.
pub fn build_resume_prompt(resume_text: &str) -> ResumePrompt {
    ResumePrompt {
        system: RESUME_PARSE_SYSTEM,
        user: RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text.trim()),
    }
}
