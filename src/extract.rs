//! Decoding of untrusted completion output
//!
//! The completion service is asked for JSON but frequently wraps it in a
//! Markdown code fence, with or without a language tag. Decoding is a
//! two-step pass: strip any surrounding fence, then parse the remainder
//! into the requested type. Both steps return typed errors instead of
//! panicking, since the input is entirely under the oracle's control.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PlannerError;

/// Remove a surrounding Markdown code fence, if present.
///
/// Tolerates leading/trailing whitespace, a missing fence on either side,
/// and any language tag after the opening backticks. Returns the inner
/// text with surrounding whitespace trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.split_once('\n') {
            // Drop the rest of the fence line when it looks like a language
            // tag; anything else is payload that happens to share the line.
            Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
            _ => rest,
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Strip fences and parse the payload into `T`.
///
/// Invalid JSON yields [`PlannerError::MalformedResponse`]; JSON of the
/// wrong shape yields [`PlannerError::MissingField`] when a required key
/// is absent and `MalformedResponse` otherwise.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, PlannerError> {
    let stripped = strip_code_fences(raw);
    let value: Value = serde_json::from_str(stripped)
        .map_err(|e| PlannerError::malformed(format!("invalid JSON: {e}")))?;
    from_value(value)
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, PlannerError> {
    serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        // serde emits "missing field `name`" for absent required keys;
        // recover the field name so the caller can report it.
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            Some(field) => PlannerError::missing_field(field),
            None => PlannerError::malformed(message),
        }
    })
}
