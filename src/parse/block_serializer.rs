use crate::model::heading::{Clock, LogBookEntry, PlanningItem, PropertyListItem};
use crate::parse::inline_serializer::render_fragments;
use crate::parse::timestamp_serializer::render_timestamp;

/// Render planning items in order, each line prefixed with `indent`.
/// Consecutive keyword items share a line; a bare timestamp always gets its
/// own line.
pub fn render_planning_lines(items: &[PlanningItem], indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for item in items {
        match item.kind.keyword() {
            Some(keyword) => {
                current.push(format!("{}: {}", keyword, render_timestamp(&item.timestamp)));
            }
            None => {
                if !current.is_empty() {
                    lines.push(format!("{}{}", indent, current.join(" ")));
                    current.clear();
                }
                lines.push(format!("{}{}", indent, render_timestamp(&item.timestamp)));
            }
        }
    }
    if !current.is_empty() {
        lines.push(format!("{}{}", indent, current.join(" ")));
    }
    lines
}

/// Render a property drawer, or nothing when there are no properties
pub fn render_property_drawer(items: &[PropertyListItem], indent: &str) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("{}:PROPERTIES:", indent)];
    for item in items {
        lines.push(format!(
            "{}:{}:{}{}",
            indent,
            item.property,
            " ".repeat(item.spacing),
            render_fragments(&item.value)
        ));
    }
    lines.push(format!("{}:END:", indent));
    lines
}

/// Render a logbook drawer, or nothing when there are no entries. Clock
/// lines carry their own indentation.
pub fn render_log_book(entries: &[LogBookEntry], indent: &str) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("{}:LOGBOOK:", indent)];
    for entry in entries {
        match entry {
            LogBookEntry::Clock(clock) => lines.push(render_clock(clock)),
            LogBookEntry::Raw(line) => lines.push(line.clone()),
        }
    }
    lines.push(format!("{}:END:", indent));
    lines
}

/// `CLOCK: [start]--[end] =>  1:30`, or `CLOCK: [start]` while running
pub fn render_clock(clock: &Clock) -> String {
    let start = render_timestamp(&clock.start);
    match &clock.end {
        Some(end) => format!(
            "{}CLOCK: {}--{}{}",
            clock.indent,
            start,
            render_timestamp(end),
            clock.suffix
        ),
        None => format!("{}CLOCK: {}", clock.indent, start),
    }
}
