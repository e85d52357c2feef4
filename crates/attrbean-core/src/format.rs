//! Conversion of raw property values to attribute strings.

use crate::Value;

/// Substitutes used for booleans nested inside arrays and sequences.
const NESTED_TRUE: &str = "true";
const NESTED_FALSE: &str = "false";

/// Format a raw value as a single attribute string.
///
/// Rules, in priority order:
///
/// 1. `Null` gives `None`.
/// 2. Text is returned unchanged (no escaping).
/// 3. Booleans resolve to `when_true` / `when_false`; `None` means omit.
/// 4. Arrays and sequences format each element recursively (booleans as
///    `"true"`/`"false"`) and join them with single spaces, flattening any
///    nesting. Empty sequences give an empty string.
/// 5. Everything else uses its default textual form.
///
/// # Example
///
/// ```
/// use attrbean_core::{Value, format_value};
///
/// let nested = Value::array([[1.0_f64, 2.7], [3.99, 77.8]]);
/// assert_eq!(format_value(&nested, None, None).as_deref(), Some("1.0 2.7 3.99 77.8"));
///
/// let flag = Value::from(true);
/// assert_eq!(format_value(&flag, Some("disabled"), None).as_deref(), Some("disabled"));
/// assert_eq!(format_value(&Value::from(false), Some("disabled"), None), None);
/// ```
pub fn format_value(value: &Value, when_true: Option<&str>, when_false: Option<&str>) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Str(s) => Some(s.clone()),
        Value::Bool(true) => when_true.map(str::to_owned),
        Value::Bool(false) => when_false.map(str::to_owned),
        Value::Array(items) | Value::Seq(items) => {
            let mut out = String::new();
            join_into(&mut out, items);
            Some(out)
        }
        other => Some(other.to_string()),
    }
}

/// Append each element's formatted text to `out`, space separated.
///
/// A null element contributes the literal `null`. The separator is only
/// written once `out` holds text, so leading empty elements vanish while
/// later ones still leave their separator.
fn join_into(out: &mut String, items: &[Value]) {
    for item in items {
        let text = format_value(item, Some(NESTED_TRUE), Some(NESTED_FALSE));
        let text = text.as_deref().unwrap_or("null");
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: impl Into<Value>) -> Option<String> {
        format_value(&value.into(), Some("name"), None)
    }

    #[test]
    fn test_null_is_omitted() {
        assert_eq!(fmt(Value::Null), None);
    }

    #[test]
    fn test_text_is_identity() {
        assert_eq!(fmt("a <b> & c").as_deref(), Some("a <b> & c"));
        assert_eq!(fmt("").as_deref(), Some(""));
    }

    #[test]
    fn test_boolean_substitutes() {
        assert_eq!(fmt(true).as_deref(), Some("name"));
        assert_eq!(fmt(false), None);
        assert_eq!(
            format_value(&Value::from(false), Some("yes"), Some("no")).as_deref(),
            Some("no")
        );
    }

    #[test]
    fn test_char_array() {
        assert_eq!(fmt(['a', 'b', 'c']).as_deref(), Some("a b c"));
    }

    #[test]
    fn test_double_array() {
        assert_eq!(fmt([1.0_f64, 2.7]).as_deref(), Some("1.0 2.7"));
    }

    #[test]
    fn test_nested_double_array_flattens() {
        let value = Value::array([[1.0_f64, 2.7], [3.99, 77.8]]);
        assert_eq!(fmt(value).as_deref(), Some("1.0 2.7 3.99 77.8"));
    }

    #[test]
    fn test_integer_arrays() {
        assert_eq!(fmt([1_u8, 2, 3]).as_deref(), Some("1 2 3"));
        assert_eq!(fmt([-1_i16, 0]).as_deref(), Some("-1 0"));
        assert_eq!(fmt([10_i64, 20]).as_deref(), Some("10 20"));
        assert_eq!(fmt([0.5_f32]).as_deref(), Some("0.5"));
    }

    #[test]
    fn test_sequence_of_strings() {
        assert_eq!(fmt(vec!["a", "b", "c"]).as_deref(), Some("a b c"));
    }

    #[test]
    fn test_empty_sequence_is_empty_string() {
        assert_eq!(fmt(Vec::<String>::new()).as_deref(), Some(""));
        assert_eq!(fmt(Value::Array(Vec::new())).as_deref(), Some(""));
    }

    #[test]
    fn test_nested_booleans_use_literal_text() {
        assert_eq!(fmt(vec![true, false]).as_deref(), Some("true false"));
    }

    #[test]
    fn test_null_element_renders_literal() {
        let value = Value::seq([Value::from("a"), Value::Null, Value::from("b")]);
        assert_eq!(fmt(value).as_deref(), Some("a null b"));
    }

    #[test]
    fn test_empty_elements_keep_separators() {
        assert_eq!(fmt(Value::seq(["a", "", "b"])).as_deref(), Some("a  b"));
        assert_eq!(fmt(Value::seq(["a", ""])).as_deref(), Some("a "));
        assert_eq!(fmt(Value::seq(["", "a"])).as_deref(), Some("a"));
        assert_eq!(fmt(Value::seq(["", "", "a"])).as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_nested_sequence_keeps_separator() {
        let value = Value::seq([Value::seq(["a"]), Value::Seq(Vec::new()), Value::seq(["b"])]);
        assert_eq!(fmt(value).as_deref(), Some("a  b"));

        let leading = Value::seq([Value::Seq(Vec::new()), Value::seq(["b"])]);
        assert_eq!(fmt(leading).as_deref(), Some("b"));
    }

    #[test]
    fn test_fallback_uses_display() {
        assert_eq!(fmt(42).as_deref(), Some("42"));
        assert_eq!(fmt(1.0_f64).as_deref(), Some("1.0"));
        assert_eq!(fmt(Value::map([("X", "Y")])).as_deref(), Some("{X=Y}"));
        assert_eq!(fmt(Value::opaque("custom")).as_deref(), Some("custom"));
    }
}
