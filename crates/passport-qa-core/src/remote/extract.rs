//! Best-effort extraction of a JSON object from free-text model replies.
//!
//! A fenced block opened with ```` ```json ```` wins when present; otherwise
//! the first balanced `{ ... }` span in the text is used. Only the chosen
//! candidate is parsed. If it is not a JSON object the reply is treated as
//! an empty object.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::ContentAssessment;

const FENCE: &str = "```";

/// Parses a model reply into an assessment, never failing.
#[must_use]
pub fn parse_reply(text: &str) -> ContentAssessment {
    let value = extract_json_object(text).unwrap_or_else(|| Value::Object(Map::new()));
    ContentAssessment::from_value(&value)
}

/// Finds the first JSON object in `text`, fenced block first.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Value> {
    let candidate = match fenced_json_block(text) {
        Some(block) => block,
        None => first_brace_span(text)?,
    };
    let value = parse_object(candidate);
    if value.is_none() {
        debug!("reply candidate did not parse as a JSON object");
    }
    value
}

fn parse_object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate.trim())
        .ok()
        .filter(Value::is_object)
}

/// Body of the first ```` ```json ```` fence, up to the closing fence.
fn fenced_json_block(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some(start) = rest.find(FENCE) {
        let after = &rest[start + FENCE.len()..];
        let (info, body) = after.split_once('\n')?;
        if info.trim().eq_ignore_ascii_case("json") {
            let end = body.find(FENCE)?;
            return Some(&body[..end]);
        }
        rest = after;
    }
    None
}

/// The first `{` and its matching `}`, skipping braces inside strings.
fn first_brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
