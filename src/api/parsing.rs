use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::SummarizerError;

/// Pulls the raw HTTP body out of a proxy event, undoing base64 transfer
/// encoding when the front door applied it.
pub fn extract_body(payload: &Value) -> Result<String, SummarizerError> {
    let Some(body) = payload.get("body") else {
        return Err(SummarizerError::Decode("missing body".to_string()));
    };

    let Some(body_str) = body.as_str() else {
        return Err(SummarizerError::Decode("invalid body format".to_string()));
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !encoded {
        return Ok(body_str.to_string());
    }

    let bytes = STANDARD
        .decode(body_str.trim())
        .map_err(|e| SummarizerError::Decode(format!("invalid base64 body: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| SummarizerError::Decode(format!("body is not valid UTF-8: {}", e)))
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}
