//! Model output normalization.
//!
//! Models wrap JSON in markdown code fences despite being told not to.
//! This strips an optional fence pair and flattens the payload to a single
//! line so the repair pass can treat it as one candidate JSON string.

/// Strips optional code-fence wrapping and collapses line breaks to spaces.
/// Total: always returns a string, possibly empty.
pub fn flatten_model_output(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return collapse_lines(trimmed);
    }

    let mut lines = trimmed.lines();
    lines.next(); // drop opening fence

    let mut body: Vec<&str> = Vec::new();
    for line in lines {
        // Truncate at the closing fence if present.
        if line.trim().starts_with("```") {
            break;
        }
        body.push(line);
    }

    collapse_lines(body.join("\n").trim())
}

fn collapse_lines(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ").trim().to_string()
}
