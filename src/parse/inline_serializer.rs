use crate::model::fragment::Fragment;
use crate::parse::table_serializer::render_table;
use crate::parse::timestamp_serializer::render_timestamp_range;

/// Render fragments back to org text, tables at their narrowest alignment
pub fn render_fragments(fragments: &[Fragment]) -> String {
    render_fragments_with_width(fragments, 1)
}

/// Render fragments back to org text, padding table columns to at least
/// `min_column_width` display cells
pub fn render_fragments_with_width(fragments: &[Fragment], min_column_width: usize) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text { contents } => out.push_str(contents),
            Fragment::Link { uri, title } => match title {
                Some(title) => out.push_str(&format!("[[{}][{}]]", uri, title)),
                None => out.push_str(&format!("[[{}]]", uri)),
            },
            Fragment::Table(table) => out.push_str(&render_table(table, min_column_width)),
            Fragment::Timestamp { first, second } => {
                out.push_str(&render_timestamp_range(first, second.as_ref()))
            }
        }
    }
    out
}
