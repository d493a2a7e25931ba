use organ::model::{Fragment, IdAllocator, LogBookEntry, PlanningType};
use organ::parse::{parse_document, serialize_document};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn read_fixture(fixture_name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture_name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", fixture_name, e))
}

/// Helper: load a fixture file, parse it, serialize it, and assert byte-for-byte equality
fn assert_round_trip(fixture_name: &str) {
    let source = read_fixture(fixture_name);
    let doc = parse_document(&source, &mut IdAllocator::new());
    let output = serialize_document(&doc);

    assert_eq!(
        output, source,
        "Round-trip failed for fixture: {}",
        fixture_name
    );
}

// ============================================================================
// Fixture round-trips
// ============================================================================

#[test]
fn round_trip_scenario() {
    assert_round_trip("scenario.org");
}

#[test]
fn round_trip_project() {
    assert_round_trip("project.org");
}

#[test]
fn round_trip_messy() {
    assert_round_trip("messy.org");
}

#[test]
fn round_trip_inline_sources() {
    for source in [
        "",
        "\n",
        "just text\nno headings",
        "*",
        "* ",
        "*\n**\n***",
        "* a\n\n\n",
        "* a :tag:\t",
        "* a\r\nbody\r\n",
        "* DONE\u{00a0}x",
        "* Ünïcödé :tâg:\n| ü | longer |\n|---+---|\n| x | y |",
    ] {
        let doc = parse_document(source, &mut IdAllocator::new());
        assert_eq!(serialize_document(&doc), source);
    }
}

// ============================================================================
// Structure of parsed fixtures
// ============================================================================

#[test]
fn scenario_structure() {
    let doc = parse_document(&read_fixture("scenario.org"), &mut IdAllocator::new());
    assert_eq!(doc.headings.len(), 1);
    let heading = &doc.headings[0];
    assert_eq!(heading.nesting_level, 1);
    assert_eq!(heading.todo_keyword(), Some("TODO"));
    assert_eq!(heading.title_line.raw_title, "Buy milk ");
    assert_eq!(heading.tags(), ["shopping"]);
    assert_eq!(heading.planning_items.len(), 1);
    assert_eq!(heading.planning_items[0].kind, PlanningType::Scheduled);
    assert_eq!(heading.planning_items[0].timestamp.day, "01");
    assert_eq!(heading.description, vec![Fragment::text("Get 2% milk")]);
}

#[test]
fn project_structure() {
    let doc = parse_document(&read_fixture("project.org"), &mut IdAllocator::new());

    assert_eq!(doc.todo_keyword_sets.len(), 1);
    let set = &doc.todo_keyword_sets[0];
    assert_eq!(set.keywords, vec!["TODO", "NEXT", "WAITING", "DONE", "CANCELLED"]);
    assert_eq!(set.completed_keywords, vec!["DONE", "CANCELLED"]);

    let levels: Vec<usize> = doc.headings.iter().map(|h| h.nesting_level).collect();
    assert_eq!(levels, vec![1, 2, 2, 3, 1, 1, 2, 1]);

    let first = &doc.headings[0];
    assert_eq!(first.todo_keyword(), Some("NEXT"));
    assert_eq!(first.tags(), ["work", "urgent"]);
    let kinds: Vec<PlanningType> = first.planning_items.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PlanningType::Deadline, PlanningType::Scheduled]);
    assert_eq!(first.property_list_items.len(), 3);
    assert_eq!(first.property_list_items[1].spacing, 3);
    assert!(matches!(first.property_list_items[2].value[0], Fragment::Link { .. }));

    let clocks = first
        .log_book_entries
        .iter()
        .filter(|e| e.clock().is_some())
        .count();
    assert_eq!(clocks, 2);
    assert!(matches!(first.log_book_entries[1], LogBookEntry::Raw(_)));
    assert!(
        first
            .description
            .iter()
            .any(|f| matches!(f, Fragment::Table(t) if t.rows.len() == 2))
    );

    let review = &doc.headings[1];
    assert_eq!(review.planning_items[0].kind, PlanningType::TimestampTitle);

    let mirror = &doc.headings[3];
    assert_eq!(mirror.title_line.raw_title, "Mirror to a second host   ");
    assert_eq!(mirror.tags(), ["infra"]);

    assert!(!doc.headings[5].marker_only);
    assert!(doc.headings[6].marker_only);

    let ideas = &doc.headings[7];
    assert_eq!(ideas.tags(), ["someday"]);
    assert_eq!(ideas.title_line.trailing, "  ");
}

#[test]
fn messy_lines_stay_in_descriptions() {
    let doc = parse_document(&read_fixture("messy.org"), &mut IdAllocator::new());

    let spaced = &doc.headings[0];
    assert!(spaced.planning_items.is_empty());
    assert!(spaced.property_list_items.is_empty());
    assert!(spaced.log_book_entries.is_empty());
    assert!(
        spaced
            .raw_description
            .as_deref()
            .is_some_and(|d| d.starts_with("SCHEDULED:  <2024-01-15 Mon>"))
    );

    // The body declaration replaces the implicit TODO | DONE set
    assert_eq!(doc.todo_keyword_sets.len(), 1);
    assert!(doc.todo_keyword_sets[0].in_body);
    assert_eq!(doc.headings[1].todo_keyword(), None);
    let later = doc.headings.last().unwrap();
    assert_eq!(later.todo_keyword(), Some("LATER"));

    let fake_tags = doc
        .headings
        .iter()
        .find(|h| h.title_line.raw_title.starts_with("title with fake tags"))
        .unwrap();
    assert!(fake_tags.tags().is_empty());
}

#[test]
fn reparse_is_stable_apart_from_ids() {
    let source = read_fixture("project.org");
    let first = parse_document(&source, &mut IdAllocator::new());
    let second = parse_document(&serialize_document(&first), &mut IdAllocator::starting_at(100));

    assert_eq!(first.headings.len(), second.headings.len());
    for (a, b) in first.headings.iter().zip(&second.headings) {
        assert_eq!(a.id + 100, b.id);
        let mut b = b.clone();
        b.id = a.id;
        assert_eq!(a, &b);
    }
    assert_eq!(first.preamble, second.preamble);
    assert_eq!(first.todo_keyword_sets, second.todo_keyword_sets);
}
