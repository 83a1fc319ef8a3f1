//! Per-operation decoders for identity tool results.

use crate::application::tooling::unwrap_result;
use serde_json::Value;

/// Entries returned by `list-did`. Anything that is not an array counts as empty.
pub fn decode_did_list(raw: Value) -> Vec<Value> {
    match unwrap_result(raw) {
        Value::Array(entries) => entries,
        _ => Vec::new(),
    }
}

/// Record returned by `create-did` together with the identifier it carries
pub fn decode_created_did(raw: Value) -> (Value, Option<String>) {
    let record = unwrap_result(raw);
    let did = did_field(&record);
    (record, did)
}

/// Identifier of a listed DID entry: the string itself or its DID field
pub fn did_of(entry: &Value) -> Option<String> {
    match entry.as_str() {
        Some(did) => Some(did.to_string()),
        None => did_field(entry),
    }
}

/// `didState.did` if present, else top-level `did`
pub fn did_field(record: &Value) -> Option<String> {
    record
        .pointer("/didState/did")
        .and_then(Value::as_str)
        .or_else(|| record.get("did").and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_accepts_envelopes_and_plain_arrays() {
        let wrapped = json!({ "content": [ { "text": "[\"did:cheqd:testnet:xyz\"]" } ] });
        assert_eq!(decode_did_list(wrapped), vec![json!("did:cheqd:testnet:xyz")]);
        assert_eq!(decode_did_list(json!([{ "did": "a" }])), vec![json!({ "did": "a" })]);
    }

    #[test]
    fn non_arrays_count_as_empty() {
        assert!(decode_did_list(json!({ "content": [ { "text": "No DIDs found" } ] })).is_empty());
        assert!(decode_did_list(json!({ "dids": [] })).is_empty());
    }

    #[test]
    fn nested_did_state_wins() {
        let record = json!({ "did": "did:top", "didState": { "did": "did:nested" } });
        assert_eq!(did_field(&record).as_deref(), Some("did:nested"));
    }

    #[test]
    fn falls_back_to_top_level_did() {
        let record = json!({ "did": "did:top", "didState": { "state": "finished" } });
        assert_eq!(did_field(&record).as_deref(), Some("did:top"));
    }

    #[test]
    fn listed_strings_are_identifiers() {
        assert_eq!(did_of(&json!("did:cheqd:testnet:xyz")).as_deref(), Some("did:cheqd:testnet:xyz"));
    }

    #[test]
    fn unknown_when_no_identifier() {
        let (record, did) = decode_created_did(json!({ "content": [ { "text": "created" } ] }));
        assert_eq!(record, json!("created"));
        assert!(did.is_none());
    }
}
