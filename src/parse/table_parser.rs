use crate::model::fragment::{Cell, Row, Table};
use crate::parse::inline_parser::parse_inline;

/// Whether a description line belongs to a table
pub fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Parse a contiguous block of `|`-prefixed lines.
///
/// A `|-...` line closes the current logical row. Consecutive content lines
/// without a separator between them are one logical row whose cells hold one
/// segment per physical line, joined with `\n`.
pub fn parse_table(lines: &[&str]) -> Table {
    // Each logical row: its cells as per-physical-line segments
    let mut rows: Vec<Vec<Vec<String>>> = vec![Vec::new()];
    let mut physical_lines: Vec<usize> = vec![0];

    for line in lines {
        let line = line.trim();
        if line.starts_with("|-") {
            let current_is_empty = rows.last().is_some_and(|r| r.is_empty());
            if !current_is_empty {
                rows.push(Vec::new());
                physical_lines.push(0);
            }
            continue;
        }

        let segments = split_cells(line);
        let (Some(row), Some(seen)) = (rows.last_mut(), physical_lines.last_mut()) else {
            continue;
        };
        for (i, segment) in segments.into_iter().enumerate() {
            if i >= row.len() {
                // A cell that earlier physical lines of this row did not have
                row.push(vec![String::new(); *seen]);
            }
            row[i].push(segment);
        }
        *seen += 1;
    }

    // Drop the row opened by a trailing separator
    if rows.len() > 1 && rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }

    let max_cells = rows.iter().map(|r| r.len()).max().unwrap_or(0).max(1);

    let rows = rows
        .into_iter()
        .map(|segments_by_cell| {
            let mut cells: Vec<Cell> = segments_by_cell
                .into_iter()
                .map(|segments| make_cell(segments.join("\n")))
                .collect();
            cells.resize_with(max_cells, Cell::empty);
            Row { cells }
        })
        .collect();

    Table { rows }
}

/// Build a cell from its raw text, parsing inline markup
pub fn make_cell(raw_contents: String) -> Cell {
    let contents = parse_inline(&raw_contents);
    Cell {
        raw_contents,
        contents,
    }
}

/// Split a trimmed table line on `|`, dropping the empty pieces produced by
/// the leading and trailing pipe, and trimming each cell.
fn split_cells(line: &str) -> Vec<String> {
    let mut parts: Vec<&str> = line.split('|').collect();
    if parts.first().is_some_and(|p| p.is_empty()) {
        parts.remove(0);
    }
    if parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
        parts.pop();
    }
    parts.into_iter().map(|p| p.trim().to_string()).collect()
}
