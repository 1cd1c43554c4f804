//! Parameter encoders: record to key-value mapping, mapping to query string,
//! mapping to JSON body.
//!
//! # Design
//! Every parameter record is first serialized into a `serde_json` object so
//! both encoders work from the same mapping. The query encoder flattens
//! nested values with bracket notation (`key[]=v`, `key[sub]=v`), emits
//! booleans as `1`/`0` and visits keys in sorted order at every level, so the
//! produced URL is deterministic regardless of how the mapping was built.

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::error::RouterError;

/// A key-value mapping of request parameters.
pub type Parameters = Map<String, Value>;

/// Serialize a parameter record into a key-value mapping.
///
/// Fails with `RouterError::Encoding` if the record cannot be serialized or
/// does not serialize to a JSON object.
pub fn to_parameters<T: Serialize + ?Sized>(record: &T) -> Result<Parameters, RouterError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(RouterError::Encoding(format!(
            "expected a key-value mapping, got {}",
            value_kind(&other)
        ))),
    }
}

/// Append `parameters` to the query string of `url`.
///
/// Existing query pairs on `url` are kept. A mapping that flattens to no
/// pairs leaves the URL untouched, so no dangling `?` is produced.
pub fn append_query(url: &mut Url, parameters: &Parameters) {
    let pairs = query_pairs(parameters);
    if pairs.is_empty() {
        return;
    }
    url.query_pairs_mut().extend_pairs(pairs);
}

/// Flatten `parameters` into ordered `(key, value)` pairs, before
/// percent-encoding.
pub fn query_pairs(parameters: &Parameters) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in sorted(parameters) {
        flatten(key.clone(), value, &mut pairs);
    }
    pairs
}

/// Encode `parameters` as a JSON request body.
pub fn json_body(parameters: &Parameters) -> Result<String, RouterError> {
    Ok(serde_json::to_string(parameters)?)
}

fn flatten(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (nested, value) in sorted(map) {
                flatten(format!("{key}[{nested}]"), value, pairs);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten(format!("{key}[]"), item, pairs);
            }
        }
        Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Null => pairs.push((key, String::new())),
    }
}

fn sorted(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            _ => panic!("test parameters must be an object"),
        }
    }

    #[test]
    fn to_parameters_rejects_non_mappings() {
        let err = to_parameters(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, RouterError::Encoding(ref msg) if msg.contains("an array")));

        let err = to_parameters("cvv").unwrap_err();
        assert!(matches!(err, RouterError::Encoding(_)));
    }

    #[test]
    fn to_parameters_propagates_serializer_failures() {
        use std::collections::HashMap;

        // JSON object keys must be strings.
        let mut record = HashMap::new();
        record.insert((1, 2), "pair key");
        let err = to_parameters(&record).unwrap_err();
        assert!(matches!(err, RouterError::Encoding(_)));
    }

    #[test]
    fn query_pairs_flatten_with_brackets_in_key_order() {
        let pairs = query_pairs(&params(json!({
            "statuses": ["active", "inactive"],
            "limit": 10,
            "amount": {"currency": "EUR", "amount": "5.00"},
            "primary": true,
            "note": null,
        })));
        let expected: Vec<(String, String)> = [
            ("amount[amount]", "5.00"),
            ("amount[currency]", "EUR"),
            ("limit", "10"),
            ("note", ""),
            ("primary", "1"),
            ("statuses[]", "active"),
            ("statuses[]", "inactive"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn append_query_percent_encodes_pairs() {
        let mut url = Url::parse("https://example.test/cards").unwrap();
        append_query(
            &mut url,
            &params(json!({"account_numbers": ["EVP 1"], "card_owner_id": "a&b"})),
        );
        assert_eq!(
            url.as_str(),
            "https://example.test/cards?account_numbers%5B%5D=EVP+1&card_owner_id=a%26b"
        );
    }

    #[test]
    fn append_query_with_nothing_to_add_leaves_url_unchanged() {
        let mut url = Url::parse("https://example.test/cards").unwrap();
        append_query(&mut url, &Parameters::new());
        append_query(&mut url, &params(json!({"statuses": []})));
        assert_eq!(url.as_str(), "https://example.test/cards");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn append_query_keeps_existing_pairs() {
        let mut url = Url::parse("https://example.test/cards?lang=en").unwrap();
        append_query(&mut url, &params(json!({"limit": 5})));
        assert_eq!(url.as_str(), "https://example.test/cards?lang=en&limit=5");
    }

    #[test]
    fn json_body_encodes_mapping() {
        let body = json_body(&params(json!({"cvv2": "123"}))).unwrap();
        assert_eq!(body, r#"{"cvv2":"123"}"#);
    }
}
