//! Field coercion over the untyped parse tree.
//!
//! Every read of model-supplied data goes through this module. Nothing
//! here fails: malformed fields are repaired to a safe default so that a
//! minor formatting slip by the model never blocks display.

use serde_json::Value;

use crate::report::model::Scores;

pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 100;

/// Coerce a raw score into `0..=100`.
///
/// Numbers and numeric strings are rounded half away from zero, then
/// clamped. Anything else, and any non-finite value, becomes 0.
pub fn coerce_score(value: Option<&Value>) -> u8 {
    let Some(n) = value.and_then(numeric) else {
        return 0;
    };
    if !n.is_finite() {
        return 0;
    }

    let rounded = n.round();
    let clamped = if rounded <= SCORE_MIN as f64 {
        SCORE_MIN
    } else if rounded >= SCORE_MAX as f64 {
        SCORE_MAX
    } else {
        rounded as i64
    };

    clamped as u8
}

/// Read all three scores from the `scores` member, if it is an object.
pub fn coerce_scores(value: Option<&Value>) -> Scores {
    let obj = value.and_then(Value::as_object);
    let field = |name: &str| coerce_score(obj.and_then(|o| o.get(name)));

    Scores {
        security: field("security"),
        structure_readability: field("structure_readability"),
        space_performance_optimization: field("space_performance_optimization"),
    }
}

/// Read a list field. Non-arrays become an empty list.
///
/// Items keep their order and count. String items are kept verbatim;
/// any other item is carried as its compact JSON text.
pub fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(display_text).collect(),
        _ => Vec::new(),
    }
}

/// Read the summary. Absent or null becomes empty.
pub fn coerce_summary(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => display_text(v),
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

/// Parse a whole numeric string, or failing that its longest numeric
/// prefix (`"85/100"` reads as 85).
fn parse_numeric_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<f64>() {
        return Some(n);
    }

    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn score(v: Value) -> u8 {
        coerce_score(Some(&v))
    }

    #[test]
    fn in_range_integers_pass_through() {
        assert_eq!(score(json!(0)), 0);
        assert_eq!(score(json!(42)), 42);
        assert_eq!(score(json!(100)), 100);
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(score(json!(150)), 100);
        assert_eq!(score(json!(105)), 100);
        assert_eq!(score(json!(-1)), 0);
        assert_eq!(score(json!(1e300)), 100);
        assert_eq!(score(json!(u64::MAX)), 100);
    }

    #[test]
    fn rounds_before_clamping() {
        assert_eq!(score(json!(42.5)), 43);
        assert_eq!(score(json!(42.4)), 42);
        assert_eq!(score(json!(100.6)), 100);
        assert_eq!(score(json!(99.5)), 100);
        assert_eq!(score(json!(-3.7)), 0);
        assert_eq!(score(json!(-5.2)), 0);
        assert_eq!(score(json!(0.5)), 1);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        assert_eq!(score(json!("85")), 85);
        assert_eq!(score(json!(" 70 ")), 70);
        assert_eq!(score(json!("85/100")), 85);
        assert_eq!(score(json!("12.5 points")), 13);
        assert_eq!(score(json!("-20")), 0);
    }

    #[test]
    fn non_numeric_values_become_zero() {
        assert_eq!(score(json!("abc")), 0);
        assert_eq!(score(json!("")), 0);
        assert_eq!(score(json!(true)), 0);
        assert_eq!(score(json!(null)), 0);
        assert_eq!(score(json!([50])), 0);
        assert_eq!(score(json!({"value": 50})), 0);
        assert_eq!(coerce_score(None), 0);
    }

    #[test]
    fn non_finite_strings_become_zero() {
        assert_eq!(score(json!("inf")), 0);
        assert_eq!(score(json!("-infinity")), 0);
        assert_eq!(score(json!("NaN")), 0);
    }

    #[test]
    fn scores_object_missing_or_wrong_type() {
        assert_eq!(coerce_scores(None), Scores::default());
        assert_eq!(coerce_scores(Some(&json!("high"))), Scores::default());

        let partial = coerce_scores(Some(&json!({"security": 90})));
        assert_eq!(partial.security, 90);
        assert_eq!(partial.structure_readability, 0);
        assert_eq!(partial.space_performance_optimization, 0);
    }

    #[test]
    fn lists_keep_order_and_length() {
        let items: Vec<String> = (0..9).map(|i| format!("item {i}")).collect();
        let list = coerce_list(Some(&json!(items)));

        assert_eq!(list, items);
    }

    #[test]
    fn non_array_lists_become_empty() {
        assert!(coerce_list(None).is_empty());
        assert!(coerce_list(Some(&json!("one issue"))).is_empty());
        assert!(coerce_list(Some(&json!(null))).is_empty());
        assert!(coerce_list(Some(&json!({"0": "x"}))).is_empty());
    }

    #[test]
    fn non_string_list_items_are_kept_as_json_text() {
        let list = coerce_list(Some(&json!(["a", 7, {"k": "v"}, null])));
        assert_eq!(list, vec!["a", "7", "{\"k\":\"v\"}", "null"]);
    }

    #[test]
    fn summary_defaults_to_empty() {
        assert_eq!(coerce_summary(None), "");
        assert_eq!(coerce_summary(Some(&json!(null))), "");
        assert_eq!(coerce_summary(Some(&json!("fine"))), "fine");
        assert_eq!(coerce_summary(Some(&json!(3))), "3");
    }
}
