//! Helpers for the loosely-shaped JSON payloads returned by Congress.gov.
//!
//! The API is inconsistent about list-valued fields: the same field can be a
//! bare array, a single object, or an object wrapping the list under `item`.
//! [`coerce_to_sequence`] is the one place that shape is unwrapped.

use serde_json::Value;

/// Flattens a list-valued payload field into a sequence of entries.
///
/// - `[a, b]` yields `a`, `b`
/// - `{"item": [a, b]}` yields `a`, `b`
/// - `{"item": a}` yields `a`
/// - any other object yields the object itself
/// - null and scalars yield nothing
pub fn coerce_to_sequence(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(object @ Value::Object(map)) => match map.get("item") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Null) => Vec::new(),
            Some(item) => vec![item],
            None => vec![object],
        },
        _ => Vec::new(),
    }
}

/// Same as [`coerce_to_sequence`], keeping only object entries.
pub fn coerce_to_objects(value: Option<&Value>) -> Vec<&serde_json::Map<String, Value>> {
    coerce_to_sequence(value)
        .into_iter()
        .filter_map(Value::as_object)
        .collect()
}

/// Strips ASCII control characters and trims surrounding whitespace.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c, '\u{0000}'..='\u{001F}' | '\u{007F}'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Renders a scalar JSON value as cleaned text. Null, arrays and objects are empty.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => clean_text(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Returns the cleaned text of the first key that holds a non-empty value.
pub fn text_field(payload: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| value_text(payload.get(*key)))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Coerces a witness entry of any shape to a trimmed display name.
pub fn witness_name(value: &Value) -> String {
    match value {
        Value::String(s) => clean_text(s),
        Value::Object(map) => {
            let name = text_field(map, &["name"]);
            if !name.is_empty() {
                return name;
            }
            let parts: Vec<String> = [
                text_field(map, &["lastName"]),
                text_field(map, &["firstName"]),
            ]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
            if parts.is_empty() {
                clean_text(&value.to_string())
            } else {
                parts.join(", ")
            }
        }
        Value::Null => String::new(),
        other => clean_text(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_bare_array() {
        let value = json!(["a", "b"]);
        assert_eq!(coerce_to_sequence(Some(&value)), vec![&json!("a"), &json!("b")]);
    }

    #[test]
    fn coerce_item_wrapped_array() {
        let value = json!({"item": [{"name": "x"}, {"name": "y"}]});
        assert_eq!(coerce_to_sequence(Some(&value)).len(), 2);
    }

    #[test]
    fn coerce_item_wrapped_single_object() {
        let value = json!({"item": {"name": "x"}});
        assert_eq!(coerce_to_sequence(Some(&value)), vec![&json!({"name": "x"})]);
    }

    #[test]
    fn coerce_plain_object_is_single_entry() {
        let value = json!({"name": "x"});
        assert_eq!(coerce_to_sequence(Some(&value)), vec![&value]);
    }

    #[test]
    fn coerce_missing_and_scalars_are_empty() {
        assert!(coerce_to_sequence(None).is_empty());
        assert!(coerce_to_sequence(Some(&Value::Null)).is_empty());
        assert!(coerce_to_sequence(Some(&json!("text"))).is_empty());
        assert!(coerce_to_sequence(Some(&json!({"item": null}))).is_empty());
    }

    #[test]
    fn coerce_objects_drops_non_objects() {
        let value = json!([{"a": 1}, "b", 3]);
        assert_eq!(coerce_to_objects(Some(&value)).len(), 1);
    }

    #[test]
    fn clean_text_strips_controls_and_whitespace() {
        assert_eq!(clean_text("  Markup\u{0007} of\tH.R. 1 \n"), "Markup ofH.R. 1");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn text_field_prefers_first_non_empty_key() {
        let payload = json!({"pdfUrl": "", "pdfURL": " http://x/doc.pdf "});
        let map = payload.as_object().unwrap();
        assert_eq!(text_field(map, &["pdfUrl", "pdfURL"]), "http://x/doc.pdf");
        assert_eq!(text_field(map, &["missing"]), "");
    }

    #[test]
    fn text_field_renders_numbers() {
        let payload = json!({"congress": 119});
        assert_eq!(text_field(payload.as_object().unwrap(), &["congress"]), "119");
    }

    #[test]
    fn witness_name_shapes() {
        assert_eq!(witness_name(&json!(" Jane Doe ")), "Jane Doe");
        assert_eq!(witness_name(&json!({"name": "Jane Doe"})), "Jane Doe");
        assert_eq!(
            witness_name(&json!({"lastName": "Doe", "firstName": "Jane"})),
            "Doe, Jane"
        );
        assert_eq!(witness_name(&json!(42)), "42");
        assert_eq!(witness_name(&Value::Null), "");
    }
}
