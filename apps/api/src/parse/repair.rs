//! Tolerant JSON repair for near-JSON model output.
//!
//! Strict parse first. On failure, discard any prose prefix before the
//! first `{` or `[`, heal the common syntactic defects models produce
//! (smart quotes, single-quoted strings, unquoted keys, trailing commas,
//! truncated structures), then strict-parse once more. The repaired text is
//! never trusted directly — it still has to survive `serde_json`.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("model output is not parseable as JSON")]
pub struct RepairError;

/// Strict parse, then strip-prefix + repair + strict parse. First success
/// wins; if both attempts fail the caller gets `RepairError`.
pub fn parse_lenient(text: &str) -> Result<Value, RepairError> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    let start = text.find(|c| c == '{' || c == '[').ok_or(RepairError)?;
    let repaired = repair(&text[start..]);
    serde_json::from_str(&repaired).map_err(|_| RepairError)
}

/// Structural repair pass. Output is valid-JSON-shaped for the defect
/// classes handled here; anything else still fails the second strict parse.
fn repair(input: &str) -> String {
    let requoted = normalize_quotes(input);
    let balanced = requote_and_balance(&requoted);
    strip_trailing_commas(&balanced)
}

/// Typographic quotes become their ASCII equivalents before tokenizing.
fn normalize_quotes(input: &str) -> String {
    input
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Single pass over the text: re-emits strings double-quoted, quotes bare
/// object keys, drops mismatched closers, and closes whatever brackets are
/// still open when the input runs out.
fn requote_and_balance(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut stack: Vec<char> = Vec::new();
    let mut expect_key = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                out.push_str(&read_string(&mut chars, c));
            }
            '{' => {
                stack.push('{');
                expect_key = true;
                out.push(c);
            }
            '[' => {
                stack.push('[');
                expect_key = false;
                out.push(c);
            }
            '}' => {
                if stack.last() == Some(&'{') {
                    stack.pop();
                    out.push(c);
                }
                expect_key = false;
            }
            ']' => {
                if stack.last() == Some(&'[') {
                    stack.pop();
                    out.push(c);
                }
                expect_key = false;
            }
            ':' => {
                expect_key = false;
                out.push(c);
            }
            ',' => {
                expect_key = stack.last() == Some(&'{');
                out.push(c);
            }
            c if expect_key && is_ident_start(c) => {
                out.push('"');
                out.push(c);
                while let Some(&next) = chars.peek() {
                    if is_ident_char(next) {
                        out.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push('"');
            }
            _ => out.push(c),
        }
    }

    while let Some(open) = stack.pop() {
        out.push(if open == '{' { '}' } else { ']' });
    }
    out
}

/// Consumes a string that opened with `quote` and emits it double-quoted.
/// An input that ends mid-string gets its closing quote appended.
fn read_string(chars: &mut Peekable<Chars>, quote: char) -> String {
    let mut out = String::from('"');
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                // A single quote needs no escape once the string is
                // double-quoted.
                Some('\'') if quote == '\'' => out.push('\''),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => break,
            },
            _ if c == quote => {
                out.push('"');
                return out;
            }
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Drops commas whose next significant character closes a structure.
/// Runs after requoting, so every string is double-quoted with escapes.
fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']') | None) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_json_parses_unchanged() {
        let value = parse_lenient(r#"{"name": "Jane", "skills": ["Rust"]}"#).unwrap();
        assert_eq!(value, json!({"name": "Jane", "skills": ["Rust"]}));
    }

    #[test]
    fn test_unquoted_keys_single_quotes_trailing_comma() {
        let value = parse_lenient("{name: 'Jane', email: 'jane@x.com',}").unwrap();
        assert_eq!(value, json!({"name": "Jane", "email": "jane@x.com"}));
    }

    #[test]
    fn test_prose_prefix_is_discarded() {
        let value = parse_lenient(r#"Here is the JSON you asked for: {"name": "Jane"}"#).unwrap();
        assert_eq!(value, json!({"name": "Jane"}));
    }

    #[test]
    fn test_smart_quotes_are_normalized() {
        let value = parse_lenient("{\u{201C}name\u{201D}: \u{2018}Jane\u{2019}}").unwrap();
        assert_eq!(value, json!({"name": "Jane"}));
    }

    #[test]
    fn test_truncated_object_is_closed() {
        let value = parse_lenient(r#"{"name": "Jane", "skills": ["Rust", "Go""#).unwrap();
        assert_eq!(value, json!({"name": "Jane", "skills": ["Rust", "Go"]}));
    }

    #[test]
    fn test_truncated_mid_string_is_closed() {
        let value = parse_lenient(r#"{"name": "Ja"#).unwrap();
        assert_eq!(value, json!({"name": "Ja"}));
    }

    #[test]
    fn test_truncation_after_comma() {
        let value = parse_lenient(r#"{"skills": ["Rust","#).unwrap();
        assert_eq!(value, json!({"skills": ["Rust"]}));
    }

    #[test]
    fn test_escaped_single_quote_in_single_quoted_string() {
        let value = parse_lenient(r"{summary: 'it\'s fine overall'}").unwrap();
        assert_eq!(value, json!({"summary": "it's fine overall"}));
    }

    #[test]
    fn test_double_quote_inside_single_quoted_string_is_escaped() {
        let value = parse_lenient(r#"{quote: 'she said "hi"'}"#).unwrap();
        assert_eq!(value, json!({"quote": "she said \"hi\""}));
    }

    #[test]
    fn test_mismatched_closer_is_dropped() {
        let value = parse_lenient(r#"{"skills": ["Rust"}]"#).unwrap();
        assert_eq!(value, json!({"skills": ["Rust"]}));
    }

    #[test]
    fn test_prose_without_any_json_fails() {
        assert!(parse_lenient("I'm sorry, I cannot process this file.").is_err());
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(parse_lenient("").is_err());
    }

    #[test]
    fn test_unrepairable_garbage_fails() {
        assert!(parse_lenient("{:::").is_err());
    }

    #[test]
    fn test_top_level_array_parses() {
        let value = parse_lenient("[{title: 'CLI tool',}]").unwrap();
        assert_eq!(value, json!([{"title": "CLI tool"}]));
    }

    #[test]
    fn test_keys_with_dashes_and_digits() {
        let value = parse_lenient("{entry_2: 'a', their-key: 'b'}").unwrap();
        assert_eq!(value, json!({"entry_2": "a", "their-key": "b"}));
    }
}
