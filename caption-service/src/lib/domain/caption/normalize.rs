use serde_json::Value;

/// Longest caption kept when falling back to a raw-JSON rendering.
const FALLBACK_MAX_CHARS: usize = 1000;

/// Normalize an inference-API response into a single caption string.
///
/// Captioning models disagree on their output shape; the ones this
/// service talks to return one of:
/// - `{"generated_text": "..."}`
/// - `[{"generated_text": "..."}]`, `[{"caption": "..."}]` or
///   `[{"label": "..."}]`
/// - a bare JSON string
///
/// Anything else is rendered as truncated JSON so the client still gets
/// a diagnosable value instead of an error.
pub fn normalize_caption(value: &Value) -> String {
    if let Some(text) = value.get("generated_text").and_then(Value::as_str) {
        return text.to_string();
    }

    if let Some(first) = value.as_array().and_then(|items| items.first()) {
        for key in ["generated_text", "caption", "label"] {
            if let Some(text) = first.get(key).and_then(Value::as_str) {
                return text.to_string();
            }
        }
    }

    if let Some(text) = value.as_str() {
        return text.to_string();
    }

    value.to_string().chars().take(FALLBACK_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_object_with_generated_text() {
        let value = json!({"generated_text": "a dog on a beach"});
        assert_eq!(normalize_caption(&value), "a dog on a beach");
    }

    #[test]
    fn test_list_shapes() {
        let generated = json!([{"generated_text": "a dog on a beach"}]);
        assert_eq!(normalize_caption(&generated), "a dog on a beach");

        let caption = json!([{"caption": "two cats"}]);
        assert_eq!(normalize_caption(&caption), "two cats");

        let label = json!([{"label": "golden retriever", "score": 0.93}]);
        assert_eq!(normalize_caption(&label), "golden retriever");
    }

    #[test]
    fn test_bare_string() {
        let value = json!("a sailboat at sunset");
        assert_eq!(normalize_caption(&value), "a sailboat at sunset");
    }

    #[test]
    fn test_unknown_shape_falls_back_to_truncated_json() {
        let value = json!({"error": "model loading", "estimated_time": 20.0});
        let caption = normalize_caption(&value);
        assert!(caption.contains("model loading"));
        assert!(caption.len() <= 1000);
    }

    #[test]
    fn test_empty_list_falls_back() {
        let value = json!([]);
        assert_eq!(normalize_caption(&value), "[]");
    }
}
