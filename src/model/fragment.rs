use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// One typed unit of parsed inline content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fragment {
    Text {
        contents: String,
    },
    /// `[[uri]]` or `[[uri][title]]`
    Link {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Table(Table),
    /// A single timestamp, or a `<a>--<b>` range
    Timestamp {
        first: Timestamp,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        second: Option<Timestamp>,
    },
}

impl Fragment {
    pub fn text(contents: impl Into<String>) -> Self {
        Fragment::Text {
            contents: contents.into(),
        }
    }
}

/// A pipe table. Every row holds the same number of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.cells.len())
    }
}

/// One logical table row. A logical row may span several physical lines,
/// in which case cell contents carry embedded newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell text, one trimmed segment per physical line, joined with `\n`
    pub raw_contents: String,
    pub contents: Vec<Fragment>,
}

impl Cell {
    pub fn empty() -> Self {
        Cell {
            raw_contents: String::new(),
            contents: Vec::new(),
        }
    }
}
