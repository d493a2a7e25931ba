use std::sync::LazyLock;

use regex::Regex;

use crate::model::document::TodoKeywordSet;
use crate::model::heading::TitleLine;
use crate::parse::inline_parser::parse_inline;

/// Declaration prefixes that introduce a keyword set
const KEYWORD_CONFIG_PREFIXES: [&str; 3] = ["#+TODO: ", "#+TYP_TODO: ", "#+SEQ_TODO: "];

static TAG_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^:[^\s]+:$").unwrap());

/// `DONE(d!)` -> `DONE`
static FAST_ACCESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^(]*)(\(.*\))?$").unwrap());

/// Parse the text of a heading line after the stars and their space.
///
/// A TODO keyword is recognized only when followed by a space. Tags are
/// taken from the last space-delimited token when it has the shape
/// `:a:b:`; anything else leaves the whole text as title.
pub fn parse_title_line(text: &str, keyword_sets: &[TodoKeywordSet]) -> TitleLine {
    let mut todo_keyword = None;
    let mut working = text;

    for keyword in keyword_sets.iter().flat_map(|s| s.keywords.iter()) {
        if let Some(rest) = text
            .strip_prefix(keyword.as_str())
            .and_then(|r| r.strip_prefix(' '))
        {
            todo_keyword = Some(keyword.clone());
            working = rest;
            break;
        }
    }

    let (raw_title, tags, trailing) = split_tags(working);
    TitleLine {
        todo_keyword,
        title: parse_inline(raw_title),
        raw_title: raw_title.to_string(),
        tags,
        trailing: trailing.to_string(),
    }
}

/// Split `working` into (title, tags, trailing whitespace).
fn split_tags(working: &str) -> (&str, Vec<String>, &str) {
    let trimmed = working.trim_end();
    if !trimmed.ends_with(':') {
        return (working, Vec::new(), "");
    }

    let token = trimmed.rsplit(' ').next().unwrap_or(trimmed);
    if !TAG_BLOCK_RE.is_match(token) {
        return (working, Vec::new(), "");
    }

    let tags: Vec<String> = token
        .split(':')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    // Only a block that re-renders to itself is a tag block; `:a::b:` stays prose
    if tags.is_empty() || render_tags(&tags) != token {
        return (working, Vec::new(), "");
    }

    let title_end = trimmed.len() - token.len();
    (&working[..title_end], tags, &working[trimmed.len()..])
}

/// `["a", "b"]` -> `:a:b:`
pub fn render_tags(tags: &[String]) -> String {
    format!(":{}:", tags.join(":"))
}

/// Parse a `#+TODO:` style declaration into a keyword set.
///
/// Returns `None` if the line is not a declaration or declares nothing.
pub fn parse_todo_keyword_config(line: &str) -> Option<TodoKeywordSet> {
    let body = KEYWORD_CONFIG_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))?;

    let mut keywords = Vec::new();
    let mut completed_keywords = Vec::new();
    let mut after_bar = false;

    for word in body.split_whitespace() {
        if word == "|" {
            after_bar = true;
            continue;
        }
        let keyword = FAST_ACCESS_RE
            .captures(word)
            .and_then(|c| c.get(1))
            .map_or(word, |m| m.as_str());
        if keyword.is_empty() {
            continue;
        }
        keywords.push(keyword.to_string());
        if after_bar {
            completed_keywords.push(keyword.to_string());
        }
    }

    if keywords.is_empty() {
        return None;
    }
    if !after_bar && let Some(last) = keywords.last() {
        completed_keywords.push(last.clone());
    }

    Some(TodoKeywordSet {
        keywords,
        completed_keywords,
        config_line: line.to_string(),
        default: false,
        in_body: false,
    })
}
