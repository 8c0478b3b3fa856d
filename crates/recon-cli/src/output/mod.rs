use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
///
/// Tables flatten one level: an array of objects becomes one row per item,
/// an object becomes key/value rows.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table(value: &Value) -> anyhow::Result<String> {
    match value {
        Value::Array(items) => Ok(render_array_table(items)),
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_rows(&["key", "value"], &rows))
        }
        scalar => Ok(value_to_cell(scalar)),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    // serde_json maps are key-ordered, so columns come out sorted
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![value_to_cell(item)]).collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows);
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| {
                    item.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_rows(&header_refs, &rows)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        record_id: &'static str,
        action: &'static str,
        score: Option<u8>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let row = Row {
            record_id: "Acme",
            action: "created",
            score: Some(96),
        };
        let out = render(&row, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["record_id"], "Acme");
        assert_eq!(parsed["score"], 96);
    }

    #[test]
    fn array_table_has_one_row_per_item() {
        let rows = [
            Row {
                record_id: "Acme",
                action: "created",
                score: None,
            },
            Row {
                record_id: "Sharma & Sons",
                action: "updated",
                score: Some(86),
            },
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        let header: Vec<&str> = lines[0].split_whitespace().collect();
        assert_eq!(header, vec!["action", "record_id", "score"]);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[3].starts_with("updated"));
        assert!(lines[3].contains("Sharma & Sons"));
        assert!(lines[2].trim_end().ends_with('-'));
    }

    #[test]
    fn empty_array_has_placeholder() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(no rows)");
    }
}
