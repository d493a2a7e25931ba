use std::sync::LazyLock;

use regex::Regex;

use crate::model::fragment::Fragment;
use crate::parse::table_parser::{is_table_line, parse_table};
use crate::parse::timestamp_parser::{TIMESTAMP_SCAN, parse_timestamp_range};

/// Links and timestamps (optionally ranged) in a single left-to-right scan
static INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\[\[(?P<uri>[^\]]*)\](?:\[(?P<title>[^\]]*)\])?\]|(?P<timestamp>{TIMESTAMP_SCAN}(?:--{TIMESTAMP_SCAN})?)"
    ))
    .unwrap()
});

/// Parse a span of text into links, timestamps and plain text.
/// Tables are not recognized here; see [`parse_markup`].
pub fn parse_inline(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut last = 0;

    for caps in INLINE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        let fragment = if let Some(uri) = caps.name("uri") {
            Some(Fragment::Link {
                uri: uri.as_str().to_string(),
                title: caps.name("title").map(|t| t.as_str().to_string()),
            })
        } else {
            parse_timestamp_range(whole.as_str())
                .map(|(first, second)| Fragment::Timestamp { first, second })
        };

        // An unparseable timestamp stays in the surrounding text
        let Some(fragment) = fragment else {
            continue;
        };

        push_text(&mut fragments, &text[last..whole.start()]);
        fragments.push(fragment);
        last = whole.end();
    }

    push_text(&mut fragments, &text[last..]);
    fragments
}

/// Parse multi-line body text. Runs of `|` lines become table fragments and
/// everything else goes through [`parse_inline`]. Every line but the last
/// keeps its newline, so rendering the result reproduces `text`.
pub fn parse_markup(text: &str) -> Vec<Fragment> {
    let lines: Vec<&str> = text.split('\n').collect();
    let last_index = lines.len().saturating_sub(1);

    let mut fragments = Vec::new();
    let mut text_buffer = String::new();
    let mut table_lines: Vec<&str> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if is_table_line(line) {
            if !text_buffer.is_empty() {
                fragments.extend(parse_inline(&text_buffer));
                text_buffer.clear();
            }
            table_lines.push(line);
            continue;
        }

        if !table_lines.is_empty() {
            fragments.push(Fragment::Table(parse_table(&table_lines)));
            table_lines.clear();
            // The newline that ended the table's last line
            text_buffer.push('\n');
        }

        text_buffer.push_str(line);
        if i != last_index {
            text_buffer.push('\n');
        }
    }

    if !table_lines.is_empty() {
        fragments.push(Fragment::Table(parse_table(&table_lines)));
    }
    if !text_buffer.is_empty() {
        fragments.extend(parse_inline(&text_buffer));
    }

    merge_text(fragments)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn push_text(fragments: &mut Vec<Fragment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Fragment::Text { contents }) = fragments.last_mut() {
        contents.push_str(text);
    } else {
        fragments.push(Fragment::text(text));
    }
}

fn merge_text(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut merged = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        match fragment {
            Fragment::Text { contents } => push_text(&mut merged, &contents),
            other => merged.push(other),
        }
    }
    merged
}
