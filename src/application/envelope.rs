//! `{status, data}` envelope validation and nested-payload decoding.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FetchError;

/// Status value of a successful response.
pub const SUCCESS: &str = "success";

/// Outcome of unwrapping the `data` field.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Structured records, decoded from an object or a JSON-encoded string.
    Records(Value),
    /// `data` was a string that is not valid JSON.
    DecodeFailure(String),
}

/// The two shapes `data` arrives in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataField {
    Encoded(String),
    Structured(Value),
}

impl DataField {
    fn into_payload(self) -> Payload {
        match self {
            Self::Structured(value) => Payload::Records(value),
            Self::Encoded(text) => match serde_json::from_str(&text) {
                Ok(value) => Payload::Records(value),
                Err(err) => Payload::DecodeFailure(err.to_string()),
            },
        }
    }
}

/// Validate the envelope of `body` and unwrap its `data` field.
///
/// With `require_status`, a body without a `status` field is rejected; a
/// present `status` other than `"success"` is always rejected.
pub fn open_envelope(url: &str, body: Value, require_status: bool) -> Result<Payload, FetchError> {
    let envelope_error = |reason: String| FetchError::Envelope {
        url: url.to_string(),
        reason,
    };

    let mut fields = match body {
        Value::Object(fields) => fields,
        other => {
            return Err(envelope_error(format!(
                "expected a JSON object, got {}",
                kind(&other)
            )))
        }
    };

    check_status(&fields, require_status).map_err(envelope_error)?;

    let data = fields
        .remove("data")
        .ok_or_else(|| envelope_error("missing data field".to_string()))?;

    let field = serde_json::from_value::<DataField>(data)
        .map_err(|err| envelope_error(format!("unreadable data field: {err}")))?;
    Ok(field.into_payload())
}

fn check_status(fields: &Map<String, Value>, require_status: bool) -> Result<(), String> {
    match fields.get("status") {
        Some(Value::String(status)) if status == SUCCESS => Ok(()),
        Some(Value::String(status)) => Err(format!("API returned error status: {status}")),
        Some(other) => Err(format!("API returned error status: {other}")),
        None if require_status => Err("missing status field".to_string()),
        None => Ok(()),
    }
}

fn kind(value: &Value) -> &'static str {
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
    use super::*;
    use serde_json::json;

    const URL: &str = "https://reports.test/api";

    #[test]
    fn test_structured_data() {
        let body = json!({"status": "success", "data": {"Store A": []}});
        assert_eq!(
            open_envelope(URL, body, true).unwrap(),
            Payload::Records(json!({"Store A": []}))
        );
    }

    #[test]
    fn test_double_encoded_data_is_reparsed() {
        let body = json!({"status": "success", "data": "{\"Store A\": [{\"count\": 1}]}"});
        assert_eq!(
            open_envelope(URL, body, true).unwrap(),
            Payload::Records(json!({"Store A": [{"count": 1}]}))
        );
    }

    #[test]
    fn test_bad_inner_json_is_decode_failure() {
        let body = json!({"status": "success", "data": "{not json"});
        assert!(matches!(
            open_envelope(URL, body, true).unwrap(),
            Payload::DecodeFailure(_)
        ));
    }

    #[test]
    fn test_failure_status_is_rejected() {
        let body = json!({"status": "error", "data": {}});
        let err = open_envelope(URL, body, false).unwrap_err();
        assert_eq!(
            err,
            FetchError::Envelope {
                url: URL.into(),
                reason: "API returned error status: error".into()
            }
        );
    }

    #[test]
    fn test_status_requirement() {
        let body = json!({"data": []});
        assert!(open_envelope(URL, body.clone(), true).is_err());
        assert_eq!(open_envelope(URL, body, false).unwrap(), Payload::Records(json!([])));
    }

    #[test]
    fn test_non_object_body() {
        let err = open_envelope(URL, json!([1, 2]), false).unwrap_err();
        assert!(err.to_string().contains("expected a JSON object, got an array"));
    }

    #[test]
    fn test_missing_data() {
        let err = open_envelope(URL, json!({"status": "success"}), true).unwrap_err();
        assert!(matches!(err, FetchError::Envelope { ref reason, .. } if reason == "missing data field"));
    }
}
