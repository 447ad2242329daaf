//! Two-stage decode of model output: strip markdown fences, then parse JSON.

use serde::de::DeserializeOwned;

use crate::error::ParseFailure;

const FENCE: &str = "```";

/// Strip a surrounding markdown code fence from a model response.
///
/// A fence only counts when "```" opens a line. Handles "```json ... ```",
/// bare "``` ... ```", any other info string, and prose around a single
/// fenced block. Unfenced input comes back trimmed, backticks inside JSON
/// string values included.
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(open) = find_line_fence(trimmed) else {
        return trimmed;
    };

    let after_open = &trimmed[open + FENCE.len()..];
    // The rest of the opening line is the info string ("json", "JSON", "")
    let body_start = match after_open.find('\n') {
        Some(newline) if is_info_string(&after_open[..newline]) => newline + 1,
        _ => after_open
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphanumeric())
            .map(|(i, _)| i)
            .unwrap_or(after_open.len()),
    };
    let body = &after_open[body_start..];

    match find_closing_fence(body) {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// First "```" at the start of `text` or right after a newline.
fn find_line_fence(text: &str) -> Option<usize> {
    text.match_indices(FENCE)
        .map(|(i, _)| i)
        .find(|&i| i == 0 || text[..i].ends_with('\n'))
}

/// First "```" that opens a line or ends the body.
fn find_closing_fence(body: &str) -> Option<usize> {
    body.match_indices(FENCE).map(|(i, _)| i).find(|&i| {
        let line_start = body[..i].trim_end_matches([' ', '\t']).is_empty()
            || body[..i].trim_end_matches([' ', '\t']).ends_with('\n');
        line_start || body[i + FENCE.len()..].trim().is_empty()
    })
}

fn is_info_string(line: &str) -> bool {
    line.trim().chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Decode a model response into `T` after stripping code fences.
///
/// A response that is already a JSON object or array is decoded as-is first.
pub fn decode<T: DeserializeOwned>(response: &str) -> Result<T, ParseFailure> {
    let trimmed = response.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str(trimmed) {
            return Ok(value);
        }
    }

    let json = strip_code_fences(response);
    if json.is_empty() {
        return Err(ParseFailure::Empty);
    }
    Ok(serde_json::from_str(json)?)
}
