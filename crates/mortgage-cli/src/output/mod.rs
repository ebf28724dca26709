pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Decimals travel as full-precision strings; people read them to the cent.
pub(crate) fn display_amount(text: &str) -> String {
    match text.parse::<Decimal>() {
        Ok(amount) if amount.scale() > 2 => amount.round_dp(2).to_string(),
        _ => text.to_string(),
    }
}

/// "Showing 21 to 30 of 30 entries" for a visible table page.
pub(crate) fn range_summary(page: &serde_json::Map<String, Value>) -> Option<String> {
    let start = page.get("range_start")?.as_u64()?;
    let end = page.get("range_end")?.as_u64()?;
    let total = page.get("total_matching")?.as_u64()?;
    Some(format!("Showing {start} to {end} of {total} entries"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_amount_rounds_long_decimals() {
        assert_eq!(display_amount("1520.055929477642073970271157"), "1520.06");
        assert_eq!(display_amount("300000"), "300000");
        assert_eq!(display_amount("year"), "year");
    }

    #[test]
    fn test_range_summary() {
        let page = json!({"range_start": 21, "range_end": 30, "total_matching": 30});
        let text = range_summary(page.as_object().unwrap());
        assert_eq!(text.as_deref(), Some("Showing 21 to 30 of 30 entries"));
        assert_eq!(range_summary(json!({}).as_object().unwrap()), None);
    }
}
