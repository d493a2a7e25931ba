use crate::model::document::{Document, PreambleLine};
use crate::model::heading::{Heading, TitleLine};
use crate::parse::block_serializer::{render_log_book, render_planning_lines, render_property_drawer};
use crate::parse::inline_serializer::render_fragments;
use crate::parse::title_parser::render_tags;

/// Render a document back to org text
pub fn serialize_document(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in &doc.preamble {
        match line {
            PreambleLine::Text(text) => lines.push(text.clone()),
            PreambleLine::TodoConfig(index) => match doc.todo_keyword_sets.get(*index) {
                Some(set) => lines.push(set.config_line.clone()),
                None => log::warn!("preamble refers to missing keyword set {}", index),
            },
        }
    }

    for heading in &doc.headings {
        lines.extend(serialize_heading(heading));
    }

    lines.join("\n")
}

/// Render one heading and its body as lines
pub fn serialize_heading(heading: &Heading) -> Vec<String> {
    let mut lines = vec![render_heading_line(heading)];
    let indent = heading.block_indent.as_str();
    lines.extend(render_planning_lines(&heading.planning_items, indent));
    lines.extend(render_property_drawer(&heading.property_list_items, indent));
    lines.extend(heading.log_notes.iter().cloned());
    lines.extend(render_log_book(&heading.log_book_entries, indent));
    if let Some(description) = &heading.raw_description {
        lines.push(description.clone());
    }
    lines
}

/// `** TODO Title :tag:`
pub fn render_heading_line(heading: &Heading) -> String {
    let stars = "*".repeat(heading.nesting_level);
    if heading.marker_only && is_blank(&heading.title_line) {
        return stars;
    }
    format!("{} {}", stars, render_title_line(&heading.title_line))
}

/// Title line text after the stars and their space
pub fn render_title_line(title_line: &TitleLine) -> String {
    let mut out = String::new();
    if let Some(keyword) = &title_line.todo_keyword {
        out.push_str(keyword);
        out.push(' ');
    }
    out.push_str(&render_fragments(&title_line.title));
    if !title_line.tags.is_empty() {
        out.push_str(&render_tags(&title_line.tags));
    }
    out.push_str(&title_line.trailing);
    out
}

fn is_blank(title_line: &TitleLine) -> bool {
    title_line.todo_keyword.is_none()
        && title_line.title.is_empty()
        && title_line.tags.is_empty()
        && title_line.trailing.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::heading::IdAllocator;
    use crate::parse::document_parser::parse_document;
    use crate::parse::inline_parser::parse_inline;

    fn round_trip(source: &str) -> String {
        serialize_document(&parse_document(source, &mut IdAllocator::new()))
    }

    #[test]
    fn test_round_trip_scenario() {
        let source = "* TODO Buy milk :shopping:\nSCHEDULED: <2024-03-01 Fri>\nGet 2% milk";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_round_trip_edges() {
        for source in [
            "",
            "\n",
            "* a",
            "* a\n",
            "*",
            "* ",
            "**\n* b :x:  ",
            "intro\n\n* a\n** b\n\n",
            "#+TODO: A | B\n#+TITLE: t\n* A x",
        ] {
            assert_eq!(round_trip(source), source, "{source:?}");
        }
    }

    #[test]
    fn test_round_trip_indented_body() {
        let source = concat!(
            "* DONE Ship it\n",
            "  CLOSED: [2024-03-02 Sat 10:00] SCHEDULED: <2024-03-01 Fri -1d .+1w>\n",
            "  :PROPERTIES:\n",
            "  :EFFORT: 1:00\n",
            "  :END:\n",
            "  - State \"DONE\"       from \"TODO\"       [2024-03-02 Sat 10:00]\n",
            "  :LOGBOOK:\n",
            "  CLOCK: [2024-03-01 Fri 09:00]--[2024-03-01 Fri 10:00] =>  1:00\n",
            "  :END:\n",
            "  Done."
        );
        let doc = parse_document(source, &mut IdAllocator::new());
        let heading = &doc.headings[0];
        assert_eq!(heading.block_indent, "  ");
        assert_eq!(heading.planning_items.len(), 2);
        assert_eq!(heading.property_list_items.len(), 1);
        assert_eq!(heading.log_notes.len(), 1);
        assert_eq!(heading.log_book_entries.len(), 1);
        assert_eq!(heading.raw_description.as_deref(), Some("  Done."));
        assert_eq!(serialize_document(&doc), source);
    }

    #[test]
    fn test_edited_title_renders() {
        let mut doc = parse_document("* TODO a :x:", &mut IdAllocator::new());
        let title = &mut doc.headings[0].title_line;
        title.todo_keyword = Some("DONE".to_string());
        title.title = parse_inline("b ");
        title.tags.push("y".to_string());
        assert_eq!(serialize_document(&doc), "* DONE b :x:y:");
    }

    #[test]
    fn test_new_heading_without_title() {
        let mut doc = parse_document("", &mut IdAllocator::new());
        doc.preamble.clear();
        doc.headings.push(Heading::new(0, 1, TitleLine {
            todo_keyword: Some("TODO".to_string()),
            raw_title: String::new(),
            title: Vec::new(),
            tags: Vec::new(),
            trailing: String::new(),
        }));
        assert_eq!(serialize_document(&doc), "* TODO ");
    }
}
