//! Reading generated text out of flow responses.
//!
//! Flow engine versions have answered in several shapes over time. They are
//! tried in this order:
//!
//! 1. `{"result": ...}`
//! 2. `{"outputs": [{"outputs": [{"results": {"text": {"data": {"text": ...}}}}]}]}`
//! 3. `{"response": ...}`
//! 4. `{"text": ...}`

use crate::error::{FlowError, Result};
use serde_json::Value;

/// Longest slice of an unreadable payload quoted in the error.
const MAX_QUOTED_PAYLOAD: usize = 500;

const NESTED_TEXT_POINTER: &str = "/outputs/0/outputs/0/results/text/data/text";

/// Extract the generated text from a flow response payload.
///
/// String values are returned as-is, other values as compact JSON. A `null`
/// counts as absent.
pub fn extract_text(payload: &Value) -> Result<String> {
    let Some(object) = payload.as_object() else {
        return Err(FlowError::format(quote(payload)));
    };

    let candidates = [
        object.get("result"),
        payload.pointer(NESTED_TEXT_POINTER),
        object.get("response"),
        object.get("text"),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_null())
        .map(render)
        .ok_or_else(|| FlowError::format(quote(payload)))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn quote(payload: &Value) -> String {
    let text = payload.to_string();
    match text.char_indices().nth(MAX_QUOTED_PAYLOAD) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}
