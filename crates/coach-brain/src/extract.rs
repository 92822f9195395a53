//! Structured-response extraction from model replies.
//!
//! The contract with the prompt builders is loose: the model replies with
//! JSON *somewhere* in its text, possibly fenced in a code block, possibly
//! surrounded by prose. This module is the one place that heuristic lives.

use serde_json::Value;

/// Extract a JSON value from a model reply.
///
/// Candidates are tried in order, and the first one that parses wins:
///
/// 1. the contents of a ```json fenced block
/// 2. the contents of the first fenced block of any language
/// 3. the span from the first `{` to the last `}`
/// 4. the whole trimmed reply
///
/// Returns `None` when no candidate parses.
pub fn extract_structured(text: &str) -> Option<Value> {
    for candidate in [
        fenced_block(text, Some("json")),
        fenced_block(text, None),
        brace_span(text),
        Some(text.trim().to_string()),
    ]
    .into_iter()
    .flatten()
    {
        if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
            return Some(value);
        }
    }
    None
}

/// The contents of the first fenced code block, optionally requiring a
/// language tag.
fn fenced_block(text: &str, language: Option<&str>) -> Option<String> {
    let fence = match language {
        Some(lang) => format!("```{lang}"),
        None => "```".to_string(),
    };
    let start = text.find(&fence)? + fence.len();
    let after_fence = &text[start..];

    // Skip the rest of the fence line (a bare ``` may still carry a tag).
    let content_start = after_fence.find('\n').map(|nl| nl + 1).unwrap_or(0);
    let content = &after_fence[content_start..];

    let end = content.find("```")?;
    Some(content[..end].trim().to_string())
}

/// The span from the first `{` to the last `}`, inclusive.
fn brace_span(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(text[start..=end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_fenced_block() {
        let reply = "Here is your analysis:\n```json\n{\"sentiment\": \"angry\", \"confidence\": 0.9}\n```\nLet me know if you need more.";
        assert_eq!(
            extract_structured(reply).unwrap(),
            json!({"sentiment": "angry", "confidence": 0.9})
        );
    }

    #[test]
    fn test_bare_fenced_block() {
        let reply = "```\n{\"overallScore\": 72}\n```";
        assert_eq!(extract_structured(reply).unwrap(), json!({"overallScore": 72}));
    }

    #[test]
    fn test_brace_span_inside_prose() {
        let reply = "Sure! {\"ok\": true} - hope that helps.";
        assert_eq!(extract_structured(reply).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_whole_reply_is_json() {
        let reply = "  {\"a\": [1, 2, 3]}  ";
        assert_eq!(extract_structured(reply).unwrap(), json!({"a": [1, 2, 3]}));
    }

    #[test]
    fn test_unparseable_reply_is_none() {
        assert!(extract_structured("I couldn't produce a score this time.").is_none());
    }

    #[test]
    fn test_malformed_fence_falls_back_to_brace_span() {
        // The fence never closes, but a valid object is still in there.
        let reply = "```json\n{\"score\": 50}";
        assert_eq!(extract_structured(reply).unwrap(), json!({"score": 50}));
    }

    #[test]
    fn test_fence_candidate_preferred_over_outer_braces() {
        let reply = "The shape {like this} is wrong.\n```json\n{\"right\": 1}\n```";
        assert_eq!(extract_structured(reply).unwrap(), json!({"right": 1}));
    }
}
