use std::sync::LazyLock;

use regex::Regex;

use crate::model::document::{Document, PreambleLine, TodoKeywordSet};
use crate::model::heading::{Heading, IdAllocator};
use crate::parse::block_parser::parse_heading_body;
use crate::parse::inline_parser::parse_markup;
use crate::parse::title_parser::{parse_title_line, parse_todo_keyword_config};

/// A run of stars followed by a space or the end of the line
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\*+)(?: |$)").unwrap());

/// A heading line as scanned, before its title and body are parsed
struct RawHeading<'a> {
    level: usize,
    marker_only: bool,
    title: &'a str,
    body: Vec<&'a str>,
}

/// Parse a whole org file. Uses the implicit `TODO | DONE` workflow when the
/// text declares no keyword set.
pub fn parse_document(source: &str, ids: &mut IdAllocator) -> Document {
    parse_document_with_keyword_sets(source, &[], ids)
}

/// Parse a whole org file, falling back to `fallback_sets` when the text
/// declares no keyword set of its own. An empty fallback means `TODO | DONE`.
pub fn parse_document_with_keyword_sets(
    source: &str,
    fallback_sets: &[TodoKeywordSet],
    ids: &mut IdAllocator,
) -> Document {
    let mut preamble = Vec::new();
    let mut todo_keyword_sets = Vec::new();
    let mut raw_headings: Vec<RawHeading> = Vec::new();

    for line in source.split('\n') {
        if let Some(level) = heading_level(line) {
            raw_headings.push(RawHeading {
                level,
                marker_only: line.len() == level,
                title: line.get(level + 1..).unwrap_or(""),
                body: Vec::new(),
            });
            continue;
        }

        let config = parse_todo_keyword_config(line);
        match raw_headings.last_mut() {
            None => match config {
                Some(set) => {
                    preamble.push(PreambleLine::TodoConfig(todo_keyword_sets.len()));
                    todo_keyword_sets.push(set);
                }
                None => preamble.push(PreambleLine::Text(line.to_string())),
            },
            Some(heading) => {
                if let Some(mut set) = config {
                    set.in_body = true;
                    todo_keyword_sets.push(set);
                }
                heading.body.push(line);
            }
        }
    }

    if todo_keyword_sets.is_empty() {
        if fallback_sets.is_empty() {
            todo_keyword_sets.push(TodoKeywordSet::default_set());
        } else {
            todo_keyword_sets.extend(fallback_sets.iter().cloned());
        }
    }

    let headings: Vec<Heading> = raw_headings
        .into_iter()
        .map(|raw| build_heading(raw, &todo_keyword_sets, ids))
        .collect();

    log::debug!(
        "parsed {} headings, {} keyword sets, {} preamble lines",
        headings.len(),
        todo_keyword_sets.len(),
        preamble.len()
    );

    Document {
        headings,
        todo_keyword_sets,
        preamble,
    }
}

/// Build a single heading from its title text (no stars) and a level.
/// Used to create headings outside of a file parse.
pub fn heading_from_title(
    title: &str,
    nesting_level: usize,
    keyword_sets: &[TodoKeywordSet],
    ids: &mut IdAllocator,
) -> Heading {
    Heading::new(ids.next_id(), nesting_level, parse_title_line(title, keyword_sets))
}

/// Star count of a heading line, or `None` for any other line
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING_RE.captures(line).and_then(|c| c.get(1)).map(|m| m.len())
}

fn build_heading(raw: RawHeading, keyword_sets: &[TodoKeywordSet], ids: &mut IdAllocator) -> Heading {
    let mut heading = heading_from_title(raw.title, raw.level, keyword_sets, ids);
    heading.marker_only = raw.marker_only;

    let body = parse_heading_body(&raw.body);
    heading.description = body
        .raw_description
        .as_deref()
        .map(parse_markup)
        .unwrap_or_default();
    heading.raw_description = body.raw_description;
    heading.planning_items = body.planning_items;
    heading.property_list_items = body.property_list_items;
    heading.log_notes = body.log_notes;
    heading.log_book_entries = body.log_book_entries;
    heading.block_indent = body.block_indent;
    heading
}
