use indexmap::IndexMap;
use serde::Serialize;

use crate::model::heading::{Heading, PlanningType};
use crate::ops::clocking::{ClockTotals, format_duration};
use crate::parse::inline_serializer::render_fragments;
use crate::parse::timestamp_serializer::render_timestamp;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HeadingJson {
    pub id: u64,
    pub level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub planning: Vec<PlanningJson>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clocked: Option<ClockJson>,
}

#[derive(Serialize)]
pub struct PlanningJson {
    #[serde(rename = "type")]
    pub kind: PlanningType,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ClockJson {
    pub own: String,
    pub recursive: String,
    pub own_ms: i64,
    pub recursive_ms: i64,
}

#[derive(Serialize)]
pub struct ClockRowJson {
    pub level: usize,
    pub title: String,
    #[serde(flatten)]
    pub totals: ClockJson,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn heading_to_json(heading: &Heading, totals: Option<ClockTotals>) -> HeadingJson {
    HeadingJson {
        id: heading.id,
        level: heading.nesting_level,
        keyword: heading.title_line.todo_keyword.clone(),
        title: display_title(heading),
        tags: heading.title_line.tags.clone(),
        planning: heading
            .planning_items
            .iter()
            .map(|p| PlanningJson {
                kind: p.kind,
                timestamp: render_timestamp(&p.timestamp),
            })
            .collect(),
        // Later duplicates overwrite earlier ones, keeping first position
        properties: heading
            .property_list_items
            .iter()
            .map(|p| (p.property.clone(), render_fragments(&p.value)))
            .collect(),
        clocked: totals.filter(|t| t.recursive > 0).map(clock_to_json),
    }
}

pub fn clock_to_json(totals: ClockTotals) -> ClockJson {
    ClockJson {
        own: format_duration(totals.own),
        recursive: format_duration(totals.recursive),
        own_ms: totals.own,
        recursive_ms: totals.recursive,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Title text without surrounding whitespace
pub fn display_title(heading: &Heading) -> String {
    render_fragments(&heading.title_line.title).trim().to_string()
}

/// `** TODO Title :a:b:` with the stars of the heading level
pub fn format_heading_line(heading: &Heading) -> String {
    let mut line = "*".repeat(heading.nesting_level);
    if let Some(keyword) = heading.todo_keyword() {
        line.push(' ');
        line.push_str(keyword);
    }
    let title = display_title(heading);
    if !title.is_empty() {
        line.push(' ');
        line.push_str(&title);
    }
    if !heading.tags().is_empty() {
        line.push_str(&format!(" :{}:", heading.tags().join(":")));
    }
    line
}

/// `heading line   own   recursive`, right-aligned durations
pub fn format_clock_row(heading: &Heading, totals: ClockTotals, width: usize) -> String {
    format!(
        "{:<width$}  {:>6}  {:>6}",
        format_heading_line(heading),
        format_duration(totals.own),
        format_duration(totals.recursive),
        width = width
    )
}
