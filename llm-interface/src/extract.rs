use regex::Regex;
use serde_json::{Map, Value};
use snooscope_core::{CoreError, ExtractionError};
use tracing::debug;

const FENCE_PATTERN: &str = r"(?s)```json\n(.*?)\n```";

/// Recovers the insight mapping from a raw model reply.
///
/// The model is instructed to answer with a single JSON object, which it
/// usually wraps in a ```json fence. The fenced interior is preferred;
/// when no fence is present the whole reply is parsed directly. Any
/// recovered value must be a JSON object. Failures propagate as
/// `ExtractionError` rather than degrading to an empty mapping.
pub fn extract_insights(raw: &str) -> Result<Map<String, Value>, CoreError> {
    if let Some(interior) = fenced_block(raw) {
        debug!("Found fenced JSON block in model reply");
        let value: Value =
            serde_json::from_str(&interior).map_err(|e| ExtractionError::InvalidJson {
                details: e.to_string(),
            })?;
        return into_object(value);
    }

    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|_| ExtractionError::NoJsonFound)?;
    into_object(value)
}

fn fenced_block(raw: &str) -> Option<String> {
    let re = Regex::new(FENCE_PATTERN).ok()?;
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn into_object(value: Value) -> Result<Map<String, Value>, CoreError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractionError::NotAnObject.into()),
    }
}
