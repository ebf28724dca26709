use serde_json::Value;

use super::{display_amount, range_summary};

/// Headline fields, most important first.
const PRIORITY_KEYS: [&str; 3] = ["monthly_payment", "total_interest", "total_payment"];

/// Print just the key answer: the monthly payment for calculations, the
/// range line for a table page.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    if let Some(summary) = value.as_object().and_then(range_summary) {
        return summary;
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    // Full calculations nest the headline figures under "summary"
    let result_obj = result_obj
        .as_object()
        .and_then(|m| m.get("summary"))
        .unwrap_or(result_obj);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => display_amount(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_envelope() {
        let value = json!({"result": {"monthly_payment": "1520.055929477642", "total_interest": "1"}});
        assert_eq!(minimal_text(&value), "1520.06");
    }

    #[test]
    fn test_schedule_envelope_uses_summary() {
        let value = json!({"result": {
            "parameters": {"principal": "300000"},
            "summary": {"monthly_payment": "843.8568"},
            "schedule": []
        }});
        assert_eq!(minimal_text(&value), "843.86");
    }

    #[test]
    fn test_table_page() {
        let value = json!({"rows": [], "range_start": 0, "range_end": 0, "total_matching": 0});
        assert_eq!(minimal_text(&value), "Showing 0 to 0 of 0 entries");
    }
}
