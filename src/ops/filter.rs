use crate::model::filter::{FilterGroup, FilterKind};
use crate::model::heading::Heading;
use crate::parse::inline_serializer::render_fragments;

/// Whether `heading` satisfies every group. An empty filter matches all.
pub fn is_match(groups: &[FilterGroup], heading: &Heading) -> bool {
    let text = headline_text(heading);
    let lowered = text.to_lowercase();

    groups.iter().all(|group| {
        let matched = match &group.kind {
            FilterKind::Tag { words } => words.iter().any(|w| heading.tags().contains(w)),
            FilterKind::Property { property, words } => {
                let name = property.to_lowercase();
                heading
                    .property_list_items
                    .iter()
                    .filter(|p| p.property.to_lowercase() == name)
                    .any(|p| {
                        let value = render_fragments(&p.value);
                        words.iter().any(|w| value.contains(w.as_str()))
                    })
            }
            FilterKind::CaseSensitive { words } => words.iter().any(|w| text.contains(w.as_str())),
            FilterKind::IgnoreCase { words } => words
                .iter()
                .any(|w| lowered.contains(w.to_lowercase().as_str())),
        };
        matched != group.exclude
    })
}

/// Indices of the headings matching `groups`, in document order
pub fn filter_headings(headings: &[Heading], groups: &[FilterGroup]) -> Vec<usize> {
    headings
        .iter()
        .enumerate()
        .filter(|(_, h)| is_match(groups, h))
        .map(|(i, _)| i)
        .collect()
}

/// `KEYWORD raw title`, or just the raw title
fn headline_text(heading: &Heading) -> String {
    match heading.todo_keyword() {
        Some(keyword) => format!("{} {}", keyword, heading.title_line.raw_title),
        None => heading.title_line.raw_title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::heading::IdAllocator;
    use crate::parse::document_parser::parse_document;
    use crate::parse::filter_parser::parse_filter;

    const SOURCE: &str = "* TODO Plan header :plan_tag:tag2:#technology:
:PROPERTIES:
:prop1: abc
:prop1: def
:prop2: xyz
:prop3:
:END:
* Other";

    fn matches(query: &str) -> bool {
        let doc = parse_document(SOURCE, &mut IdAllocator::new());
        is_match(&parse_filter(query).unwrap(), &doc.headings[0])
    }

    #[test]
    fn test_tags() {
        assert!(matches(""));
        assert!(matches(":plan_tag"));
        assert!(!matches(":non-existing-tag"));
        assert!(!matches(":plan_"));
        assert!(matches(":tag2 :plan_tag"));
        assert!(matches(":nonexisting|plan_tag :tag2|nonexisting2"));
        assert!(matches(":#technology"));
    }

    #[test]
    fn test_case_sensitive_text() {
        assert!(matches("TODO"));
        assert!(matches("TOD"));
        assert!(!matches("TIDI"));
        assert!(matches("TODO Plan"));
        assert!(matches("TODO|FIXME Plan"));
        assert!(!matches("TIDI|FIXME Plan"));
        assert!(!matches("PLAN"));
    }

    #[test]
    fn test_ignore_case_text() {
        assert!(matches("plan"));
        assert!(matches("\"plan head\""));
        assert!(matches("pLAN"));
        assert!(!matches("xyz"));
    }

    #[test]
    fn test_properties() {
        assert!(matches(":prop1:abc"));
        assert!(matches(":PROP1:abc"));
        assert!(matches(":prop1:b"));
        assert!(!matches(":prop1:aaa"));
        assert!(matches(":prop1:abc :prop2:xyz"));
        assert!(!matches(":prop1:abc :prop2:xxx"));
        assert!(matches(":prop1:abc :prop1:def"));
        assert!(matches(":prop3:"));
        assert!(!matches(":prop3:xxx"));
        assert!(matches(":prop1:"));
        assert!(matches(":prop1:aaa|abc"));
        assert!(!matches(":missing:"));
    }

    #[test]
    fn test_exclusion() {
        assert!(!matches("-header"));
        assert!(!matches("-Plan"));
        assert!(!matches("-:tag2"));
        assert!(!matches("-:prop1:abc"));
        assert!(matches("-:prop1:xxxxx"));
        assert!(!matches("-:prop3:"));
    }

    #[test]
    fn test_combined() {
        assert!(matches(":plan_tag TODO"));
        assert!(!matches(":plan_ TODO"));
        assert!(matches(":plan_tag TODO plan :prop1:def"));
    }

    #[test]
    fn test_filter_headings() {
        let doc = parse_document(SOURCE, &mut IdAllocator::new());
        let groups = parse_filter("-TODO").unwrap();
        assert_eq!(filter_headings(&doc.headings, &groups), vec![1]);
        assert_eq!(filter_headings(&doc.headings, &[]), vec![0, 1]);
    }
}
