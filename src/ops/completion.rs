use std::collections::BTreeSet;

/// What the completion engine can suggest from
#[derive(Debug, Clone, Default)]
pub struct CompletionSources {
    pub todo_keywords: Vec<String>,
    pub tags: Vec<String>,
    /// (name, value) pairs as collected from the document
    pub properties: Vec<(String, String)>,
}

impl CompletionSources {
    pub fn new(todo_keywords: Vec<String>, tags: Vec<String>, properties: Vec<(String, String)>) -> Self {
        CompletionSources {
            todo_keywords,
            tags,
            properties,
        }
    }

    fn tag_names(&self) -> Vec<String> {
        self.tags
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn property_names(&self) -> Vec<String> {
        self.properties
            .iter()
            .map(|(name, _)| name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn property_values(&self, name: &str) -> Vec<String> {
        self.properties
            .iter()
            .filter(|(property, _)| property.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|value| {
                if value.chars().any(char::is_whitespace) {
                    format!("\"{}\"", value)
                } else {
                    value
                }
            })
            .collect()
    }
}

/// Suggestions for the text to insert at `cursor` (a character offset).
///
/// The character before the cursor picks the domain: keywords at the start
/// of a term, tag and property names after `:`, property values after
/// `:name:`, tags after `|` inside a tag term, and the rest of a keyword
/// after its first uppercase letter. Plain lowercase text gets nothing.
pub fn compute_completions(sources: &CompletionSources, query: &str, cursor: usize) -> Vec<String> {
    let before: Vec<char> = query.chars().take(cursor).collect();
    let Some(&last) = before.last() else {
        return sources.todo_keywords.clone();
    };
    let previous = before.len().checked_sub(2).map(|i| before[i]);

    // The term being typed, without an exclusion marker
    let term_start = before
        .iter()
        .rposition(|c| c.is_whitespace())
        .map_or(0, |i| i + 1);
    let term: String = before[term_start..].iter().collect();
    let term = term.strip_prefix('-').unwrap_or(&term).to_string();

    match last {
        c if c.is_whitespace() => sources.todo_keywords.clone(),
        '-' => match previous {
            None => sources.todo_keywords.clone(),
            Some(p) if p.is_whitespace() => sources.todo_keywords.clone(),
            Some(_) => Vec::new(),
        },
        '|' => match term.strip_prefix(':') {
            Some(rest) if rest.contains(':') => {
                let name = rest.split(':').next().unwrap_or("");
                sources.property_values(name)
            }
            Some(_) => sources.tag_names(),
            None => sources.todo_keywords.clone(),
        },
        ':' => {
            if term == ":" {
                let mut names = sources.tag_names();
                names.extend(sources.property_names().into_iter().map(|n| format!("{}:", n)));
                names
            } else if let Some(name) = term
                .strip_prefix(':')
                .and_then(|t| t.strip_suffix(':'))
                .filter(|n| !n.is_empty() && !n.contains(':'))
            {
                sources.property_values(name)
            } else {
                Vec::new()
            }
        }
        c if c.is_uppercase() => {
            let at_boundary = match previous {
                None => true,
                Some(p) => p.is_whitespace() || p == '|' || (p == '-' && term.chars().count() == 1),
            };
            if !at_boundary || term.starts_with(':') {
                return Vec::new();
            }
            sources
                .todo_keywords
                .iter()
                .filter_map(|k| k.strip_prefix(c))
                .map(str::to_string)
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Completions spliced into the query at `cursor`: whole candidate queries
pub fn compute_completions_for_datalist(
    sources: &CompletionSources,
    query: &str,
    cursor: usize,
) -> Vec<String> {
    let split = query
        .char_indices()
        .nth(cursor)
        .map_or(query.len(), |(i, _)| i);
    let (before, after) = query.split_at(split);
    compute_completions(sources, query, cursor)
        .into_iter()
        .map(|completion| format!("{}{}{}", before, completion, after))
        .collect()
}
