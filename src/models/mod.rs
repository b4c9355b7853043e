use serde_json::{Number, Value};

/// Returns true for entries the page would treat as "empty".
///
/// `null`, `false` and `""` are falsy. Numbers are never falsy here, so `0`
/// stays a significant list entry.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(_) => false,
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text shown inside a default single-value field.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
}

impl FieldKind {
    /// Maps an `<input type=...>` attribute onto the value kind it produces.
    /// Anything that is not numeric edits strings.
    pub fn from_input_type(input_type: &str) -> Self {
        input_type.parse().unwrap_or_default()
    }
}

/// Converts raw field text into the value stored in the working list.
pub fn parse_field_value(kind: FieldKind, raw: &str) -> Value {
    match kind {
        FieldKind::Text => Value::String(raw.to_string()),
        FieldKind::Number => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Value::Null;
            }
            if let Ok(i) = raw.parse::<i64>() {
                return Value::Number(i.into());
            }
            raw.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }
    }
}

/// The text a user last typed into a field, and the value it was stored as.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDraft {
    pub text: String,
    pub value: Value,
}

impl FieldDraft {
    /// Records one edit. `shown` is the text the field displayed before it.
    ///
    /// Text the browser rejected (`bad_input`, e.g. `1e` or `-` in a number
    /// field) is stored as `null` while the field keeps showing `shown`, so
    /// the partial entry is not wiped out from under the cursor.
    pub fn from_edit(kind: FieldKind, text: &str, bad_input: bool, shown: &str) -> Self {
        if bad_input {
            return Self {
                text: shown.to_string(),
                value: Value::Null,
            };
        }
        Self {
            text: text.to_string(),
            value: parse_field_value(kind, text),
        }
    }
}

/// What a field should display for `value`: the user's own spelling while
/// it still stands for that value, `display_text` otherwise.
pub fn field_text(draft: Option<&FieldDraft>, value: &Value) -> String {
    match draft {
        Some(draft) if &draft.value == value => draft.text.clone(),
        _ => display_text(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_falsy_matches_page_convention() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!("")));

        assert!(!is_falsy(&json!(0)));
        assert!(!is_falsy(&json!(0.0)));
        assert!(!is_falsy(&json!(true)));
        assert!(!is_falsy(&json!(" ")));
        assert!(!is_falsy(&json!([])));
        assert!(!is_falsy(&json!({})));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(&json!(null)), "");
        assert_eq!(display_text(&json!("abc")), "abc");
        assert_eq!(display_text(&json!(0)), "0");
        assert_eq!(display_text(&json!(1.5)), "1.5");
        assert_eq!(display_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_field_kind_from_input_type() {
        assert_eq!(FieldKind::from_input_type("number"), FieldKind::Number);
        assert_eq!(FieldKind::from_input_type("text"), FieldKind::Text);
        assert_eq!(FieldKind::from_input_type("email"), FieldKind::Text);
    }

    #[test]
    fn test_parse_field_value_number() {
        assert_eq!(parse_field_value(FieldKind::Number, "0"), json!(0));
        assert_eq!(parse_field_value(FieldKind::Number, " 42 "), json!(42));
        assert_eq!(parse_field_value(FieldKind::Number, "2.5"), json!(2.5));
        assert_eq!(parse_field_value(FieldKind::Number, ""), json!(null));
        assert_eq!(parse_field_value(FieldKind::Number, "abc"), json!(null));
    }

    #[test]
    fn test_parse_field_value_text_keeps_raw_string() {
        assert_eq!(parse_field_value(FieldKind::Text, " 7 "), json!(" 7 "));
        assert_eq!(parse_field_value(FieldKind::Text, ""), json!(""));
    }

    #[test]
    fn test_draft_keeps_users_spelling_of_same_value() {
        let draft = FieldDraft::from_edit(FieldKind::Number, "1.50", false, "1.5");
        assert_eq!(draft.value, json!(1.5));
        assert_eq!(field_text(Some(&draft), &json!(1.5)), "1.50");
    }

    #[test]
    fn test_draft_for_rejected_number_keeps_shown_text() {
        // A number field reports `1e` as "" with bad input set.
        let draft = FieldDraft::from_edit(FieldKind::Number, "", true, "1");
        assert_eq!(draft.value, json!(null));

        // The row now holds null; the field must not be reset to "".
        assert_eq!(field_text(Some(&draft), &json!(null)), "1");
    }

    #[test]
    fn test_field_text_follows_new_item_in_row() {
        let draft = FieldDraft::from_edit(FieldKind::Number, "", true, "1");
        assert_eq!(field_text(Some(&draft), &json!(2)), "2");
        assert_eq!(field_text(None, &json!(2)), "2");
    }
}
