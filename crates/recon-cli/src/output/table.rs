/// Render an aligned plain-text table: header, dashed divider, rows.
///
/// Numeric cells are right-aligned; everything else is left-aligned.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format_cell(header, *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                format_cell(cell, *width, looks_numeric(cell))
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }
    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_cell(text: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}

fn looks_numeric(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::render_rows;

    #[test]
    fn columns_align_across_mixed_widths() {
        let rows = vec![
            vec!["Acme".to_string(), "96".to_string()],
            vec!["Sharma & Sons".to_string(), "100".to_string()],
        ];
        let table = render_rows(&["name", "score"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "name           score");
        assert_eq!(lines[1], "-".repeat(20));
        assert_eq!(lines[2], "Acme              96");
        assert_eq!(lines[3], "Sharma & Sons    100");
    }

    #[test]
    fn missing_cells_are_dashes() {
        let rows = vec![vec!["only".to_string()]];
        let table = render_rows(&["a", "b"], &rows);
        assert_eq!(table.lines().nth(2), Some("only  -"));
    }
}
