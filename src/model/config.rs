use serde::{Deserialize, Serialize};

use super::document::TodoKeywordSet;

/// Configuration from organ.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub keywords: KeywordConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub table: TableConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Workflow used when a file declares no `#+TODO:` line, written the way
    /// a declaration is: `["TODO", "NEXT", "|", "DONE"]`
    #[serde(default = "default_keywords")]
    pub default: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        KeywordConfig {
            default: default_keywords(),
        }
    }
}

fn default_keywords() -> Vec<String> {
    vec!["TODO".to_string(), "|".to_string(), "DONE".to_string()]
}

impl KeywordConfig {
    /// The implicit keyword set this configuration describes
    pub fn default_set(&self) -> TodoKeywordSet {
        let mut keywords = Vec::new();
        let mut completed = Vec::new();
        let mut after_bar = false;
        for word in &self.default {
            if word == "|" {
                after_bar = true;
                continue;
            }
            keywords.push(word.clone());
            if after_bar {
                completed.push(word.clone());
            }
        }
        if !after_bar && let Some(last) = keywords.last() {
            completed.push(last.clone());
        }
        if keywords.is_empty() {
            return TodoKeywordSet::default_set();
        }
        TodoKeywordSet {
            keywords,
            completed_keywords: completed,
            config_line: String::new(),
            default: true,
            in_body: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print JSON unless a command says otherwise
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Narrowest column the table renderer emits
    #[serde(default = "default_min_column_width")]
    pub min_column_width: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            min_column_width: default_min_column_width(),
        }
    }
}

fn default_min_column_width() -> usize {
    1
}
