//! Decoding of remote tool results.
//!
//! MCP servers wrap their payload as `{ "content": [ { "type": "text", "text": ... } ] }`
//! where the text is usually JSON. [`ToolOutput`] classifies a raw result at the transport
//! boundary and [`unwrap_result`] turns it into the value the caller actually wants.

use serde_json::Value;

/// Upper bound on nested text layers peeled off by [`unwrap_result`].
const MAX_UNWRAP_DEPTH: usize = 16;

/// A remote result, classified by shape
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Text carried by the first content segment
    TextEnvelope(String),
    /// Anything else, including bare strings
    Raw(Value),
}

impl ToolOutput {
    pub fn classify(value: Value) -> Self {
        match envelope_text(&value) {
            Some(text) => ToolOutput::TextEnvelope(text.to_string()),
            None => ToolOutput::Raw(value),
        }
    }

    /// One decoding step: parse text as JSON, or keep it as a string.
    pub fn decode(self) -> Value {
        match self {
            ToolOutput::TextEnvelope(text) => parse_or_passthrough(text),
            ToolOutput::Raw(Value::String(text)) => parse_or_passthrough(text),
            ToolOutput::Raw(other) => other,
        }
    }
}

/// Unwrap a remote result until it stops changing.
///
/// Repeating the single step makes the function idempotent: a payload that is itself an
/// encoded envelope or a JSON string holding JSON is peeled in the first call. Text that
/// is JSON-encoded twice yields the innermost value, so `"\"42\""` gives `42`. Past
/// `MAX_UNWRAP_DEPTH` layers the value is returned as-is and a further call peels more.
pub fn unwrap_result(value: Value) -> Value {
    let mut current = value;
    for _ in 0..MAX_UNWRAP_DEPTH {
        let next = ToolOutput::classify(current.clone()).decode();
        if next == current {
            return current;
        }
        current = next;
    }
    current
}

/// First text segment of an envelope, if the value is one
pub fn envelope_text(value: &Value) -> Option<&str> {
    value
        .get("content")
        .and_then(Value::as_array)
        .and_then(|segments| segments.first())
        .and_then(|segment| segment.get("text"))
        .and_then(Value::as_str)
}

fn parse_or_passthrough(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(parsed) => parsed,
        Err(_) => Value::String(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(text: &str) -> Value {
        json!({ "content": [ { "type": "text", "text": text } ] })
    }

    #[test]
    fn parses_json_text_from_envelope() {
        let value = unwrap_result(envelope(r#"{"didState":{"did":"did:cheqd:testnet:abc"}}"#));
        assert_eq!(value["didState"]["did"], "did:cheqd:testnet:abc");
    }

    #[test]
    fn keeps_plain_text_when_not_json() {
        let value = unwrap_result(envelope("DID created"));
        assert_eq!(value, json!("DID created"));
    }

    #[test]
    fn parses_raw_json_strings() {
        assert_eq!(unwrap_result(json!("[1,2]")), json!([1, 2]));
        assert_eq!(unwrap_result(json!("plain")), json!("plain"));
    }

    #[test]
    fn leaves_other_values_untouched() {
        let value = json!({ "did": "did:cheqd:testnet:1" });
        assert_eq!(unwrap_result(value.clone()), value);
        assert_eq!(unwrap_result(json!(42)), json!(42));
        assert_eq!(unwrap_result(json!({ "content": [] })), json!({ "content": [] }));
    }

    #[test]
    fn ignores_segments_without_text() {
        let value = json!({ "content": [ { "type": "image", "data": "..." } ] });
        assert_eq!(unwrap_result(value.clone()), value);
    }

    #[test]
    fn unwrapping_twice_changes_nothing() {
        let samples = vec![
            envelope("[]"),
            envelope(r#"["did:cheqd:testnet:xyz"]"#),
            envelope("not json"),
            envelope(r#""[1]""#),
            envelope(r#"{"content":[{"text":"7"}]}"#),
            json!("\"quoted\""),
            json!(null),
        ];
        for sample in samples {
            let once = unwrap_result(sample.clone());
            assert_eq!(unwrap_result(once.clone()), once, "sample {sample}");
        }
    }

    #[test]
    fn double_encoded_text_is_peeled_to_the_innermost_value() {
        assert_eq!(unwrap_result(envelope(r#""42""#)), json!(42));
        assert_eq!(unwrap_result(envelope(r#""\"plain\"""#)), json!("plain"));
    }

    #[test]
    fn classifies_at_the_boundary() {
        assert_eq!(
            ToolOutput::classify(envelope("x")),
            ToolOutput::TextEnvelope("x".to_string())
        );
        assert_eq!(ToolOutput::classify(json!([1])), ToolOutput::Raw(json!([1])));
    }
}
