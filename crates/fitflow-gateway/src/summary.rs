//! Flattening a free-form profile object into a one-line summary for prompts.

use fitflow_core::Document;
use serde_json::Value;

/// Summary used when a profile yields no fragments.
pub const EMPTY_PROFILE_SUMMARY: &str = "No profile details provided";

/// Known keys, with the fragment each renders to.
const LABELED_FIELDS: &[(&str, &str, &str)] = &[
    ("name", "Name: ", ""),
    ("age", "Age ", ""),
    ("gender", "Gender ", ""),
    ("height", "Height ", " cm"),
    ("weight", "Weight ", " kg"),
    ("bodyFat", "Body fat ", " %"),
    ("activity", "Activity level ", ""),
    ("goal", "Primary goal ", ""),
];

/// Render `profile` as comma-separated fragments.
///
/// Known keys render as labeled fragments when their value is truthy (not
/// null, false, zero, or empty). Any other key follows as `key: value` unless
/// its value is `""` or null.
pub fn profile_summary(profile: &Document) -> String {
    let mut segments = Vec::new();

    for (key, prefix, suffix) in LABELED_FIELDS {
        if let Some(value) = profile.get(*key).filter(|v| is_truthy(v)) {
            segments.push(format!("{}{}{}", prefix, render(value), suffix));
        }
    }

    for (key, value) in profile {
        if LABELED_FIELDS.iter().any(|(known, _, _)| known == key) {
            continue;
        }
        if value.is_null() || value.as_str() == Some("") {
            continue;
        }
        segments.push(format!("{}: {}", key, render(value)));
    }

    if segments.is_empty() {
        EMPTY_PROFILE_SUMMARY.to_string()
    } else {
        segments.join(", ")
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
