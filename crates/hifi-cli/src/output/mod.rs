use std::io::IsTerminal;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let interactive = std::io::stdout().is_terminal();
    table::TableOptions {
        max_width: std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|w| *w > 0),
        color: interactive && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options,
        )),
    }
}

/// One row per item; columns are the union of keys in first-seen order.
fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() != 0.0 => format!("{f:.2}"),
            _ => n.to_string(),
        },
        Value::String(v) => v.clone(),
        // nested entities (a stack's gear, a recommendation's component) stay compact
        Value::Object(map) => ["display_name", "name", "id"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map_or_else(|| compact_json(value), str::to_string),
        Value::Array(items) => format!("[{} items]", items.len()),
    }
}

fn compact_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("<invalid-json>"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::table::TableOptions;
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        price: f64,
    }

    #[test]
    fn json_render_is_pretty() {
        let out = render(&Example { id: "cmp-1", price: 250.0 }, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["id"], "cmp-1");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line() {
        let out = render(&Example { id: "cmp-1", price: 250.0 }, OutputFormat::Raw).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn object_renders_as_key_value_table() {
        let out = render_table(&Example { id: "cmp-1", price: 249.999 }, PLAIN).unwrap();
        let first = out.lines().next().unwrap();
        assert!(first.contains("key") && first.contains("value"));
        assert!(out.contains("250.00"));
    }

    #[test]
    fn array_columns_keep_first_seen_order() {
        let rows = json!([
            {"id": "lst-1", "price": 250, "status": "available"},
            {"id": "lst-2", "price": 199.5, "status": "sold", "location": "US-CA"}
        ]);
        let out = render_table(&rows, PLAIN).unwrap();
        let header: Vec<&str> = out.lines().next().unwrap().split_whitespace().collect();
        assert_eq!(header, vec!["id", "price", "status", "location"]);
        assert!(out.contains("199.50"));
    }

    #[test]
    fn empty_array_has_placeholder() {
        assert_eq!(render_table(&json!([]), PLAIN).unwrap(), "(no rows)");
    }

    #[test]
    fn nested_values_are_summarised() {
        assert_eq!(value_to_cell(&json!({"id": "cmp-1", "name": "HD 600"})), "HD 600");
        assert_eq!(value_to_cell(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(value_to_cell(&Value::Null), "-");
    }
}
