use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{display_amount, range_summary};

/// Format output as text tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if map.contains_key("rows") => print_page(map),
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result, map);
            } else {
                println!("{}", field_table(map, ""));
            }
        }
        Value::Array(arr) => println!("{}", rows_table(arr)),
        _ => println!("{}", value),
    }
}

/// A visible page: the rows, then the pager line.
fn print_page(page: &Map<String, Value>) {
    if let Some(Value::Array(rows)) = page.get("rows") {
        println!("{}", rows_table(rows));
    }
    if let Some(summary) = range_summary(page) {
        println!("\n{}", summary);
    }
    if let Some(line) = pager_line(page) {
        println!("{}", line);
    }
}

fn print_result(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            println!("{}", field_table(res_map, ""));
            // Arrays (the yearly schedule) get a table of their own
            for (key, val) in res_map {
                if let Value::Array(rows) = val {
                    println!("\n{}:", key);
                    println!("{}", rows_table(rows));
                }
            }
        }
        other => println!("{}", format_value(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column Field/Value table; nested objects are flattened as `outer.inner`.
fn field_table(map: &Map<String, Value>, prefix: &str) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    push_fields(&mut builder, map, prefix);
    builder.build()
}

fn push_fields(builder: &mut Builder, map: &Map<String, Value>, prefix: &str) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => push_fields(builder, inner, &name),
            Value::Array(_) => {}
            other => builder.push_record([name, format_value(other)]),
        }
    }
}

fn rows_table(rows: &[Value]) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return "(no rows)".to_string();
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    builder.build().to_string()
}

/// "Page 2 of 3: 1 [2] 3", with the current page bracketed.
fn pager_line(page: &Map<String, Value>) -> Option<String> {
    let current = page.get("current_page")?.as_u64()?;
    let total = page.get("total_pages")?.as_u64()?;
    let numbers: Vec<String> = page
        .get("page_numbers")?
        .as_array()?
        .iter()
        .filter_map(Value::as_u64)
        .map(|n| {
            if n == current {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    Some(format!("Page {current} of {total}: {}", numbers.join(" ")))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => display_amount(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
