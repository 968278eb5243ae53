/// Draws rows as a bordered text grid:
///
/// ```text
/// +----+-------+
/// | ID | Name  |
/// +====+=======+
/// | 1  | Alice |
/// +----+-------+
/// ```
pub fn grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let border = |fill: char| {
        let mut line = String::from("+");
        for w in &widths {
            line.extend(std::iter::repeat(fill).take(w + 2));
            line.push('+');
        }
        line
    };
    let line = |cells: Vec<&str>| {
        let mut out = String::from("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).copied().unwrap_or("");
            let pad = w - cell.chars().count();
            out.push(' ');
            out.push_str(cell);
            out.extend(std::iter::repeat(' ').take(pad + 1));
            out.push('|');
        }
        out
    };

    let mut out = vec![border('-'), line(headers.to_vec()), border('=')];
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
        out.push(border('-'));
    }
    if rows.is_empty() {
        out.pop();
        out.push(border('-'));
    }
    out.join("\n")
}

/// Text shown for a nullable column.
pub fn cell(value: Option<&str>) -> String {
    value.unwrap_or("None").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_columns_to_widest_cell() {
        let out = grid(
            &["ID", "Name"],
            &[
                vec!["1".into(), "Alice".into()],
                vec!["10".into(), "Bo".into()],
            ],
        );
        let expected = "\
+----+-------+
| ID | Name  |
+====+=======+
| 1  | Alice |
+----+-------+
| 10 | Bo    |
+----+-------+";
        assert_eq!(out, expected);
    }

    #[test]
    fn header_only_grid() {
        let out = grid(&["A"], &[]);
        assert_eq!(out, "+---+\n| A |\n+---+");
    }

    #[test]
    fn missing_cells_render_blank() {
        let out = grid(&["A", "B"], &[vec!["x".into()]]);
        assert!(out.contains("| x |   |"));
    }
}
