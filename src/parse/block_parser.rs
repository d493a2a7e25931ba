use std::sync::LazyLock;

use regex::Regex;

use crate::model::heading::{Clock, LogBookEntry, PlanningItem, PlanningType, PropertyListItem};
use crate::parse::block_serializer::render_clock;
use crate::parse::inline_parser::parse_inline;
use crate::parse::timestamp_parser::parse_timestamp;

static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:([^\s:]+):( *)(.*)$").unwrap());

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)CLOCK: (\[[^\]]*\])(?:--(\[[^\]]*\])((?: +=>.*)?))?$").unwrap()
});

/// The structured blocks found at the top of a heading body, plus what is left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingBody {
    pub planning_items: Vec<PlanningItem>,
    pub property_list_items: Vec<PropertyListItem>,
    pub log_notes: Vec<String>,
    pub log_book_entries: Vec<LogBookEntry>,
    /// Indentation of the recognized blocks, empty when there are none
    pub block_indent: String,
    pub raw_description: Option<String>,
}

/// Pull planning lines, the property drawer and the logbook drawer off the
/// top of a heading body, in that order.
///
/// All blocks share the indentation of the first body line. Each block is
/// recognized only when it is written exactly the way it is rendered, so
/// re-rendering reproduces the lines it consumed. Anything not recognized is
/// left in the description untouched.
pub fn parse_heading_body(lines: &[&str]) -> HeadingBody {
    let indent = lines.first().map_or("", |line| leading_whitespace(line));
    let mut idx = 0;

    let mut planning_items = Vec::new();
    let mut seen_keyword_line = false;
    let mut seen_timestamp_line = false;
    while let Some(line) = lines.get(idx).and_then(|l| l.strip_prefix(indent)) {
        if !seen_keyword_line && let Some(items) = parse_planning_line(line) {
            planning_items.extend(items);
            seen_keyword_line = true;
        } else if !seen_timestamp_line && let Some(timestamp) = parse_timestamp(line) {
            planning_items.push(PlanningItem {
                kind: PlanningType::TimestampTitle,
                timestamp,
            });
            seen_timestamp_line = true;
        } else {
            break;
        }
        idx += 1;
    }

    let mut property_list_items = Vec::new();
    if let Some((interior, next)) = drawer(lines, idx, indent, ":PROPERTIES:") {
        match parse_properties(interior, indent) {
            Some(items) => {
                property_list_items = items;
                idx = next;
            }
            None => log::debug!("property drawer not recognized, kept as description"),
        }
    }

    let mut log_notes = Vec::new();
    let mut log_book_entries = Vec::new();
    let log_book_at = log_notes_end(lines, idx, indent).unwrap_or(idx);
    if let Some((interior, next)) = drawer(lines, log_book_at, indent, ":LOGBOOK:") {
        log_notes = lines[idx..log_book_at].iter().map(|l| l.to_string()).collect();
        log_book_entries = interior.iter().map(|line| parse_log_book_line(line)).collect();
        idx = next;
    }

    let raw_description = if idx < lines.len() {
        Some(lines[idx..].join("\n"))
    } else {
        None
    };

    HeadingBody {
        block_indent: if idx > 0 { indent.to_string() } else { String::new() },
        planning_items,
        property_list_items,
        log_notes,
        log_book_entries,
        raw_description,
    }
}

/// Parse `SCHEDULED: <ts> DEADLINE: <ts>` with single spaces throughout
pub fn parse_planning_line(line: &str) -> Option<Vec<PlanningItem>> {
    let mut items = Vec::new();
    let mut rest = line;

    loop {
        let (keyword, after) = rest.split_once(": ")?;
        let kind = PlanningType::from_keyword(keyword)?;

        let close = after.find(['>', ']'])?;
        let timestamp = parse_timestamp(&after[..=close])?;
        items.push(PlanningItem { kind, timestamp });

        rest = &after[close + 1..];
        if rest.is_empty() {
            return Some(items);
        }
        rest = rest.strip_prefix(' ')?;
    }
}

/// Parse one logbook line. Anything but a `CLOCK:` line with readable
/// timestamps is kept raw.
pub fn parse_log_book_line(line: &str) -> LogBookEntry {
    if let Some(clock) = parse_clock_line(line)
        && render_clock(&clock) == line
    {
        return LogBookEntry::Clock(clock);
    }
    log::trace!("logbook line kept raw: {}", line);
    LogBookEntry::Raw(line.to_string())
}

fn parse_clock_line(line: &str) -> Option<Clock> {
    let caps = CLOCK_RE.captures(line)?;
    let start = parse_timestamp(caps.get(2)?.as_str())?;
    let end = match caps.get(3) {
        Some(end) => Some(parse_timestamp(end.as_str())?),
        None => None,
    };
    Some(Clock {
        indent: caps[1].to_string(),
        start,
        end,
        suffix: caps.get(4).map_or("", |m| m.as_str()).to_string(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start_matches([' ', '\t']).len()]
}

fn is_marker(line: &str, indent: &str, marker: &str) -> bool {
    line.strip_prefix(indent) == Some(marker)
}

/// Find a non-empty drawer opening at `start`.
/// Returns its interior lines and the index after `:END:`.
fn drawer<'a>(
    lines: &'a [&'a str],
    start: usize,
    indent: &str,
    open: &str,
) -> Option<(&'a [&'a str], usize)> {
    if !is_marker(lines.get(start)?, indent, open) {
        return None;
    }
    let end = lines[start + 1..]
        .iter()
        .position(|l| is_marker(l, indent, ":END:"))?
        + start
        + 1;
    if end == start + 1 {
        return None;
    }
    Some((&lines[start + 1..end], end + 1))
}

/// Notes start with a `- ` item and run, without blank lines, up to a
/// `:LOGBOOK:` line. Returns the index of that line.
fn log_notes_end(lines: &[&str], start: usize, indent: &str) -> Option<usize> {
    if !lines.get(start)?.trim_start().starts_with("- ") {
        return None;
    }
    lines[start..]
        .iter()
        .take_while(|l| !l.trim().is_empty())
        .position(|l| is_marker(l, indent, ":LOGBOOK:"))
        .map(|offset| start + offset)
}

fn parse_properties(interior: &[&str], indent: &str) -> Option<Vec<PropertyListItem>> {
    interior
        .iter()
        .map(|line| {
            let caps = PROPERTY_RE.captures(line.strip_prefix(indent)?)?;
            Some(PropertyListItem {
                property: caps[1].to_string(),
                value: parse_inline(&caps[3]),
                spacing: caps[2].len(),
            })
        })
        .collect()
}
