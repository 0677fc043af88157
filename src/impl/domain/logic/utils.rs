use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("hardcoded regex should be valid"));

/// Replaces every `{{key}}` in `content` with its value. Unknown keys are left
/// in place and appended to `unknown_keys` (once each).
pub(crate) fn replace_all_placeholders_in_string(
    content: &str,
    placeholders: &HashMap<String, String>,
    unknown_keys: &mut Vec<String>,
) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(content, |caps: &regex::Captures| {
            let key = &caps[1]; // The content inside {{ }}.
            if let Some(value) = placeholders.get(key) {
                value.clone()
            } else {
                if !unknown_keys.iter().any(|k| k == key) {
                    unknown_keys.push(key.to_string());
                }
                caps[0].to_string() // The full '{{key}}' string.
            }
        })
        .into_owned()
}

/// Parses a filled-in slot as a number. Blank cells and dashes count as zero;
/// anything else non-numeric yields None.
pub(crate) fn parse_figure(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Some(0.0);
    }
    let raw = trimmed.replace(",", "");
    let is_negative = raw.starts_with('(') && raw.ends_with(')');
    let value = raw
        .trim_matches(|c| c == '(' || c == ')')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())?;
    Some(if is_negative { -value } else { value })
}
