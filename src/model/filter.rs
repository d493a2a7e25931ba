use serde::{Deserialize, Serialize};

/// What one AND-group of a headline filter tests. Each variant holds the
/// OR-ed alternatives written with `|`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FilterKind {
    /// `:a|b`: exact membership in the heading's tags
    Tag { words: Vec<String> },
    /// `:name:v1|v2`: a property named `name` (any case) whose value contains
    /// one of the alternatives. An empty alternative matches any value.
    Property { property: String, words: Vec<String> },
    /// `Word|Other`: substring of keyword + title, case preserved
    CaseSensitive { words: Vec<String> },
    /// `word|other`: substring of keyword + title, case folded
    IgnoreCase { words: Vec<String> },
}

/// One whitespace-delimited unit of a filter query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    #[serde(flatten)]
    pub kind: FilterKind,
    /// Written with a leading `-`: the group must not match
    #[serde(default)]
    pub exclude: bool,
}

impl FilterGroup {
    pub fn new(kind: FilterKind) -> Self {
        FilterGroup {
            kind,
            exclude: false,
        }
    }

    pub fn excluded(kind: FilterKind) -> Self {
        FilterGroup {
            kind,
            exclude: true,
        }
    }

    pub fn words(&self) -> &[String] {
        match &self.kind {
            FilterKind::Tag { words }
            | FilterKind::Property { words, .. }
            | FilterKind::CaseSensitive { words }
            | FilterKind::IgnoreCase { words } => words,
        }
    }
}
