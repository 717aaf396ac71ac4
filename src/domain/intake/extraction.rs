//! Best-effort parsing of model replies into profile field values.
//!
//! The extraction collaborator is unreliable by contract: replies may wrap
//! JSON in markdown fences, prepend prose, return keys outside the
//! registry, or be garbage. Anything unparseable degrades to an empty
//! mapping; the conversation flow never depends on extraction succeeding.

use std::collections::BTreeMap;

use serde_json::Value;

use super::field::FieldName;

/// Parses a model reply into registry field values.
///
/// Unknown keys are dropped, `null`s (the document variant's "not found")
/// are skipped, arrays are joined with ", ", and scalars are stringified.
/// Any failure yields an empty map.
pub fn parse_field_response(response: &str) -> BTreeMap<FieldName, String> {
    let Some(json) = extract_json_object(response) else {
        return BTreeMap::new();
    };
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(&json) else {
        return BTreeMap::new();
    };

    let mut fields = BTreeMap::new();
    for (key, value) in object {
        let Ok(field) = key.parse::<FieldName>() else {
            continue;
        };
        if let Some(text) = coerce_value(&value) {
            fields.insert(field, text);
        }
    }
    fields
}

/// Locates the JSON object in a reply that may contain fences or prose.
fn extract_json_object(response: &str) -> Option<String> {
    let trimmed = response.trim();

    if let Some(json) = extract_from_code_block(trimmed) {
        return Some(json);
    }

    let start = trimmed.find('{')?;
    extract_balanced_object(trimmed, start)
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let body_start = start + pattern.len();
            if let Some(end) = s[body_start..].find("```") {
                return Some(s[body_start..body_start + end].trim().to_string());
            }
        }
    }
    None
}

/// Scans forward from `start` for the matching close brace, respecting
/// string literals and escapes.
fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Converts a JSON value into a stored field string.
///
/// `null` means "not found" and maps to absence; arrays (the tech-stack
/// list case) are flattened to a comma-separated string.
fn coerce_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Object(_) => None,
    }
}
