use serde_json::{json, Value};

pub const NO_OUTPUT_ERROR: &str = "Pipeline returned no output";

/// Normalizes a generation stage's raw text into a structured value.
///
/// The text is trimmed and any surrounding markdown code fence is stripped
/// before a strict JSON decode. Non-JSON prose degrades to a `{"report": …}`
/// wrapper around the pre-strip text; empty text degrades to an `{"error": …}`
/// wrapper. Re-parsing a serialized result yields the same value, so the
/// parser can safely run on already-parsed stage output.
pub fn parse_stage_output(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return json!({ "error": NO_OUTPUT_ERROR });
    }

    let stripped = strip_code_fence(trimmed);
    match serde_json::from_str::<Value>(stripped) {
        Ok(value) => value,
        Err(_) => json!({ "report": trimmed }),
    }
}

/// Removes one leading fence line (``` plus an optional language tag) and
/// the matching trailing fence, tolerating surrounding whitespace.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the rest of the fence line, language tag included
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => return text,
    };

    let body = body.trim_end();
    match body.strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fenced_json() {
        let input = "```json\n{\"a\": 1}\n```";
        assert_eq!(parse_stage_output(input), json!({"a": 1}));
    }

    #[test]
    fn test_parses_bare_fence_without_language_tag() {
        let input = "```\n{\"skills\": []}\n```";
        assert_eq!(parse_stage_output(input), json!({"skills": []}));
    }

    #[test]
    fn test_tolerates_surrounding_whitespace() {
        let input = "  ```json  \n{\"a\": 1}\n```  \n";
        assert_eq!(parse_stage_output(input), json!({"a": 1}));
    }

    #[test]
    fn test_plain_json_passes_through() {
        let input = r#"{"team_assessment": {"overall_score": 71.5}}"#;
        assert_eq!(
            parse_stage_output(input),
            json!({"team_assessment": {"overall_score": 71.5}})
        );
    }

    #[test]
    fn test_prose_wraps_as_report() {
        assert_eq!(parse_stage_output("Hello"), json!({"report": "Hello"}));
    }

    #[test]
    fn test_fenced_prose_keeps_pre_strip_text() {
        let input = "```\nnot json at all\n```";
        assert_eq!(parse_stage_output(input), json!({"report": input}));
    }

    #[test]
    fn test_empty_text_is_an_error() {
        assert_eq!(
            parse_stage_output(""),
            json!({"error": NO_OUTPUT_ERROR})
        );
        assert_eq!(
            parse_stage_output("   \n  "),
            json!({"error": NO_OUTPUT_ERROR})
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_stage_output("Some analyst commentary, no JSON.");
        let second = parse_stage_output(&serde_json::to_string(&first).unwrap());
        assert_eq!(first, second);

        let first = parse_stage_output("```json\n{\"verdict\": \"Pass\"}\n```");
        let second = parse_stage_output(&serde_json::to_string(&first).unwrap());
        assert_eq!(first, second);
    }
}
