use serde::{Deserialize, Serialize};

use super::heading::{Heading, HeadingId};

/// A TODO workflow declared with `#+TODO:` (or the implicit `TODO | DONE`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoKeywordSet {
    pub keywords: Vec<String>,
    /// Keywords after the `|` separator
    pub completed_keywords: Vec<String>,
    /// The declaration line exactly as written. Empty for the default set.
    pub config_line: String,
    /// True only for the set synthesized when the document declares none
    pub default: bool,
    /// The declaration sits inside a heading body rather than the preamble
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub in_body: bool,
}

impl TodoKeywordSet {
    /// The implicit `TODO | DONE` workflow
    pub fn default_set() -> Self {
        TodoKeywordSet {
            keywords: vec!["TODO".to_string(), "DONE".to_string()],
            completed_keywords: vec!["DONE".to_string()],
            config_line: String::new(),
            default: true,
            in_body: false,
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    pub fn is_completed(&self, keyword: &str) -> bool {
        self.completed_keywords.iter().any(|k| k == keyword)
    }
}

/// A line before the first heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PreambleLine {
    Text(String),
    /// A keyword declaration; the index points into `todo_keyword_sets`
    TodoConfig(usize),
}

/// A whole parsed org file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub headings: Vec<Heading>,
    pub todo_keyword_sets: Vec<TodoKeywordSet>,
    /// Lines before the first heading, in source order
    pub preamble: Vec<PreambleLine>,
}

impl Document {
    /// An empty document with the implicit keyword set
    pub fn new() -> Self {
        Document {
            headings: Vec::new(),
            todo_keyword_sets: vec![TodoKeywordSet::default_set()],
            preamble: Vec::new(),
        }
    }

    /// The keyword set declaring `keyword`, if any
    pub fn todo_keyword_set_for(&self, keyword: &str) -> Option<&TodoKeywordSet> {
        self.todo_keyword_sets.iter().find(|s| s.contains(keyword))
    }

    pub fn heading_with_id(&self, id: HeadingId) -> Option<&Heading> {
        self.headings.iter().find(|h| h.id == id)
    }

    pub fn heading_with_id_mut(&mut self, id: HeadingId) -> Option<&mut Heading> {
        self.headings.iter_mut().find(|h| h.id == id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}
