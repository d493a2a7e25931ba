use unicode_width::UnicodeWidthStr;

use crate::model::fragment::Table;

/// Render a table with aligned columns.
///
/// Each logical row becomes as many physical lines as its tallest cell;
/// logical rows are separated by `|---+---|` lines. Columns are at least
/// `min_column_width` display cells wide.
pub fn render_table(table: &Table, min_column_width: usize) -> String {
    let column_count = table.column_count();
    let mut widths = vec![min_column_width; column_count];
    for row in &table.rows {
        for (i, cell) in row.cells.iter().enumerate().take(column_count) {
            for segment in cell.raw_contents.split('\n') {
                widths[i] = widths[i].max(segment.width());
            }
        }
    }

    let separator = format!(
        "|{}|",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut lines = Vec::new();
    for (row_index, row) in table.rows.iter().enumerate() {
        if row_index > 0 {
            lines.push(separator.clone());
        }
        let segments: Vec<Vec<&str>> = row
            .cells
            .iter()
            .map(|c| c.raw_contents.split('\n').collect())
            .collect();
        let height = segments.iter().map(|s| s.len()).max().unwrap_or(1);

        for line_index in 0..height {
            let mut line = String::from("|");
            for (i, width) in widths.iter().enumerate() {
                let text = segments
                    .get(i)
                    .and_then(|s| s.get(line_index))
                    .copied()
                    .unwrap_or("");
                line.push(' ');
                line.push_str(text);
                line.push_str(&" ".repeat(width.saturating_sub(text.width())));
                line.push_str(" |");
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::table_parser::parse_table;

    #[test]
    fn test_render_aligned() {
        let table = parse_table(&["|Name|Qty|", "|-", "| apples | 3 |", "|-", "|pears|12|"]);
        insta::assert_snapshot!(render_table(&table, 1), @r"
        | Name   | Qty |
        |--------+-----|
        | apples | 3   |
        |--------+-----|
        | pears  | 12  |
        ");
    }

    #[test]
    fn test_render_wide_characters() {
        let table = parse_table(&["| 日本 | x |", "|-", "| a | y |"]);
        assert_eq!(
            render_table(&table, 1),
            "| 日本 | x |\n|------+---|\n| a    | y |"
        );
    }

    #[test]
    fn test_render_min_width() {
        let table = parse_table(&["| a |"]);
        assert_eq!(render_table(&table, 4), "| a    |");
    }

    #[test]
    fn test_render_multi_line_row() {
        let table = parse_table(&["| a | b |", "| c | d |"]);
        assert_eq!(render_table(&table, 1), "| a | b |\n| c | d |");
    }

    #[test]
    fn test_rendered_table_reparses_equal() {
        let table = parse_table(&["| x | long cell |", "|---|", "| 1 |"]);
        let rendered = render_table(&table, 1);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(parse_table(&lines), table);
    }
}
