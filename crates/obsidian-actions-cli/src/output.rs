use serde::Serialize;
use serde_json::Value;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  ").trim_end());

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

/// Print an action result.
///
/// `--json` always prints JSON (`null` for no value). Otherwise strings are
/// printed raw, lists of scalars one per line, `{id, name}` lists as a
/// table, and anything else as pretty JSON.
pub fn print_value(value: Option<&Value>, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&value);
    }
    match value {
        None => println!("ok"),
        Some(Value::String(s)) => println!("{s}"),
        Some(Value::Array(items)) if items.iter().all(is_scalar) => {
            for item in items {
                println!("{}", scalar_text(item));
            }
        }
        Some(Value::Array(items)) if items.iter().all(is_id_name) => {
            let rows = items
                .iter()
                .map(|item| vec![scalar_text(&item["id"]), scalar_text(&item["name"])])
                .collect();
            print_table(&["ID", "NAME"], rows);
        }
        Some(other) => print_json(other)?,
    }
    Ok(())
}

fn is_scalar(v: &Value) -> bool {
    !matches!(v, Value::Array(_) | Value::Object(_))
}

fn is_id_name(v: &Value) -> bool {
    v.get("id").is_some_and(is_scalar) && v.get("name").is_some_and(is_scalar)
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
