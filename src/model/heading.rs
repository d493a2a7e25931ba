use serde::{Deserialize, Serialize};

use super::fragment::Fragment;
use super::timestamp::Timestamp;

/// Heading identifier, unique within one [`IdAllocator`]
pub type HeadingId = u64;

/// Hands out heading ids. Threaded through every parse so that separate
/// parses never share hidden counter state.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: HeadingId,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator::default()
    }

    /// Continue numbering after ids handed out elsewhere
    pub fn starting_at(next: HeadingId) -> Self {
        IdAllocator { next }
    }

    pub fn next_id(&mut self) -> HeadingId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` will return
    pub fn peek(&self) -> HeadingId {
        self.next
    }
}

/// The parsed first line of a heading (without the leading stars)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleLine {
    pub todo_keyword: Option<String>,
    /// Text after keyword removal with the tag block cut off. Whitespace
    /// before the tag block stays, so `Buy milk :shopping:` keeps `"Buy milk "`.
    pub raw_title: String,
    pub title: Vec<Fragment>,
    /// Tags in the order written. Duplicates are kept.
    pub tags: Vec<String>,
    /// Whitespace that followed the tag block
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trailing: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanningType {
    Scheduled,
    Deadline,
    Closed,
    /// A bare timestamp line directly below the title
    TimestampTitle,
}

impl PlanningType {
    /// Keyword as written in a planning line. `TimestampTitle` has none.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            PlanningType::Scheduled => Some("SCHEDULED"),
            PlanningType::Deadline => Some("DEADLINE"),
            PlanningType::Closed => Some("CLOSED"),
            PlanningType::TimestampTitle => None,
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<PlanningType> {
        match keyword {
            "SCHEDULED" => Some(PlanningType::Scheduled),
            "DEADLINE" => Some(PlanningType::Deadline),
            "CLOSED" => Some(PlanningType::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningItem {
    #[serde(rename = "type")]
    pub kind: PlanningType,
    pub timestamp: Timestamp,
}

/// One `:NAME: value` line of a property drawer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyListItem {
    /// Property name, case preserved
    pub property: String,
    pub value: Vec<Fragment>,
    /// Number of spaces between `:NAME:` and the value
    #[serde(default = "default_spacing")]
    pub spacing: usize,
}

fn default_spacing() -> usize {
    1
}

impl PropertyListItem {
    pub fn new(property: impl Into<String>, value: Vec<Fragment>) -> Self {
        PropertyListItem {
            property: property.into(),
            value,
            spacing: 1,
        }
    }
}

/// A `CLOCK:` line. `end` is `None` while the clock is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Whitespace before `CLOCK:`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub indent: String,
    pub start: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    /// Text after the end timestamp as written, usually ` =>  1:30`.
    /// Never read back as a duration.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

impl Clock {
    pub fn running(start: Timestamp) -> Self {
        Clock {
            indent: String::new(),
            start,
            end: None,
            suffix: String::new(),
        }
    }

    /// A closed clock with the duration written the way org writes it
    pub fn closed(start: Timestamp, end: Timestamp) -> Self {
        let suffix = start
            .to_naive_datetime()
            .zip(end.to_naive_datetime())
            .map(|(s, e)| {
                let minutes = (e - s).num_minutes();
                format!(" => {:>2}:{:02}", minutes / 60, minutes % 60)
            })
            .unwrap_or_default();
        Clock {
            indent: String::new(),
            start,
            end: Some(end),
            suffix,
        }
    }
}

/// One line of a `:LOGBOOK:` drawer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum LogBookEntry {
    Clock(Clock),
    /// Any line that is not a clock line, kept verbatim
    Raw(String),
}

impl LogBookEntry {
    pub fn clock(&self) -> Option<&Clock> {
        match self {
            LogBookEntry::Clock(c) => Some(c),
            LogBookEntry::Raw(_) => None,
        }
    }
}

/// One outline node. Headings live in a flat list; nesting is expressed only
/// through `nesting_level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub id: HeadingId,
    pub nesting_level: usize,
    pub title_line: TitleLine,
    /// Body text left after planning, property and logbook extraction.
    /// `None` means the heading has no body lines at all, `Some("")` means
    /// one empty line.
    pub raw_description: Option<String>,
    pub description: Vec<Fragment>,
    pub planning_items: Vec<PlanningItem>,
    pub property_list_items: Vec<PropertyListItem>,
    pub log_book_entries: Vec<LogBookEntry>,
    /// Lines between the property drawer and the logbook, usually `- Note`
    /// items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log_notes: Vec<String>,
    /// Indentation shared by the planning lines and drawers
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block_indent: String,
    /// The source line was only stars, with no space after them
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub marker_only: bool,
}

impl Heading {
    /// Create a heading with an empty body
    pub fn new(id: HeadingId, nesting_level: usize, title_line: TitleLine) -> Self {
        Heading {
            id,
            nesting_level,
            title_line,
            raw_description: None,
            description: Vec::new(),
            planning_items: Vec::new(),
            property_list_items: Vec::new(),
            log_book_entries: Vec::new(),
            log_notes: Vec::new(),
            block_indent: String::new(),
            marker_only: false,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.title_line.tags
    }

    pub fn todo_keyword(&self) -> Option<&str> {
        self.title_line.todo_keyword.as_deref()
    }

    /// The first property with this name, compared case-insensitively
    pub fn property(&self, name: &str) -> Option<&PropertyListItem> {
        self.property_list_items
            .iter()
            .find(|p| p.property.eq_ignore_ascii_case(name))
    }
}
