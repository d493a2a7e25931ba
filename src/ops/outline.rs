use std::collections::BTreeSet;

use crate::model::document::Document;
use crate::model::heading::{Heading, HeadingId};
use crate::parse::inline_serializer::render_fragments;

// ---------------------------------------------------------------------------
// Navigation over the flat heading list
// ---------------------------------------------------------------------------

pub fn index_of_heading_with_id(headings: &[Heading], id: HeadingId) -> Option<usize> {
    headings.iter().position(|h| h.id == id)
}

/// The headings below `index` with a strictly greater nesting level, up to
/// the next heading at the same level or above.
pub fn subheadings_of(headings: &[Heading], index: usize) -> &[Heading] {
    let Some(heading) = headings.get(index) else {
        return &[];
    };
    let after = &headings[index + 1..];
    let end = after
        .iter()
        .position(|h| h.nesting_level <= heading.nesting_level)
        .unwrap_or(after.len());
    &after[..end]
}

/// Nearest preceding heading with a smaller nesting level
pub fn parent_index_of(headings: &[Heading], index: usize) -> Option<usize> {
    let level = headings.get(index)?.nesting_level;
    headings[..index]
        .iter()
        .rposition(|h| h.nesting_level < level)
}

pub fn has_children(headings: &[Heading], index: usize) -> bool {
    !subheadings_of(headings, index).is_empty()
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Every property as (name, value text), in document order
pub fn all_properties(headings: &[Heading]) -> Vec<(String, String)> {
    headings
        .iter()
        .flat_map(|h| h.property_list_items.iter())
        .map(|p| (p.property.clone(), render_fragments(&p.value)))
        .collect()
}

/// Distinct property names, sorted
pub fn all_property_names(headings: &[Heading]) -> Vec<String> {
    all_properties(headings)
        .into_iter()
        .map(|(name, _)| name)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct values of the property `name` (any case), sorted.
/// An empty value is included when one occurs.
pub fn all_property_values_for(headings: &[Heading], name: &str) -> Vec<String> {
    all_properties(headings)
        .into_iter()
        .filter(|(property, _)| property.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct tags, sorted
pub fn all_tags(headings: &[Heading]) -> Vec<String> {
    headings
        .iter()
        .flat_map(|h| h.tags().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct TODO keywords in declaration order
pub fn all_todo_keywords(doc: &Document) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in doc.todo_keyword_sets.iter().flat_map(|s| s.keywords.iter()) {
        if !keywords.contains(keyword) {
            keywords.push(keyword.clone());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::heading::IdAllocator;
    use crate::parse::document_parser::parse_document;

    fn doc(source: &str) -> Document {
        parse_document(source, &mut IdAllocator::new())
    }

    const OUTLINE: &str = "* a\n** b\n*** c\n** d\n* e";

    #[test]
    fn test_subheadings() {
        let doc = doc(OUTLINE);
        let titles = |hs: &[Heading]| -> Vec<String> {
            hs.iter().map(|h| h.title_line.raw_title.clone()).collect()
        };
        assert_eq!(titles(subheadings_of(&doc.headings, 0)), vec!["b", "c", "d"]);
        assert_eq!(titles(subheadings_of(&doc.headings, 1)), vec!["c"]);
        assert!(subheadings_of(&doc.headings, 4).is_empty());
        assert!(subheadings_of(&doc.headings, 99).is_empty());
    }

    #[test]
    fn test_parents_and_children() {
        let doc = doc(OUTLINE);
        assert_eq!(parent_index_of(&doc.headings, 0), None);
        assert_eq!(parent_index_of(&doc.headings, 2), Some(1));
        assert_eq!(parent_index_of(&doc.headings, 3), Some(0));
        assert!(has_children(&doc.headings, 1));
        assert!(!has_children(&doc.headings, 2));
    }

    #[test]
    fn test_index_of_id() {
        let doc = doc(OUTLINE);
        let id = doc.headings[3].id;
        assert_eq!(index_of_heading_with_id(&doc.headings, id), Some(3));
        assert_eq!(index_of_heading_with_id(&doc.headings, 1000), None);
    }

    #[test]
    fn test_vocabulary() {
        let doc = doc(concat!(
            "#+TODO: TODO NEXT | DONE\n",
            "#+TODO: WAIT | DONE\n",
            "* a :z:y:\n:PROPERTIES:\n:owner: bob\n:Size:\n:END:\n",
            "* b :y:\n:PROPERTIES:\n:OWNER: al\n:owner: bob\n:END:",
        ));
        assert_eq!(all_tags(&doc.headings), vec!["y", "z"]);
        assert_eq!(all_property_names(&doc.headings), vec!["OWNER", "Size", "owner"]);
        assert_eq!(all_property_values_for(&doc.headings, "owner"), vec!["al", "bob"]);
        assert_eq!(all_property_values_for(&doc.headings, "size"), vec![""]);
        assert_eq!(all_todo_keywords(&doc), vec!["TODO", "NEXT", "DONE", "WAIT"]);
        assert_eq!(all_properties(&doc.headings).len(), 4);
    }
}
