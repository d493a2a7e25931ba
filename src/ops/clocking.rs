use serde::Serialize;

use crate::model::heading::{Clock, Heading};
use crate::model::timestamp::Timestamp;
use crate::ops::outline::subheadings_of;

/// Clocked time of one heading, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClockTotals {
    /// This heading's own logbook
    pub own: i64,
    /// This heading plus its whole subtree
    pub recursive: i64,
}

/// Sum of all closed clock intervals of `heading`. Running clocks and clocks
/// with unreadable timestamps count as zero.
pub fn total_time_logged(heading: &Heading) -> i64 {
    clocks(heading).filter_map(clock_millis).sum()
}

/// Like [`total_time_logged`], counting only closed clocks where the start or
/// the end timestamp satisfies `keep`
pub fn total_filtered_time_logged<F>(heading: &Heading, keep: F) -> i64
where
    F: Fn(&Timestamp) -> bool,
{
    clocks(heading)
        .filter(|clock| match &clock.end {
            Some(end) => keep(&clock.start) || keep(end),
            None => false,
        })
        .filter_map(clock_millis)
        .sum()
}

/// Own and recursive totals for every heading, by index
pub fn clock_totals(headings: &[Heading]) -> Vec<ClockTotals> {
    let own: Vec<i64> = headings.iter().map(total_time_logged).collect();
    with_recursive(headings, own)
}

/// [`clock_totals`] restricted to the clocks selected by `keep`
pub fn clock_totals_filtered<F>(headings: &[Heading], keep: F) -> Vec<ClockTotals>
where
    F: Fn(&Timestamp) -> bool,
{
    let own: Vec<i64> = headings
        .iter()
        .map(|h| total_filtered_time_logged(h, &keep))
        .collect();
    with_recursive(headings, own)
}

/// `H:MM`, e.g. `1:05` or `27:30`
pub fn format_duration(millis: i64) -> String {
    let minutes = millis / 60_000;
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn clocks(heading: &Heading) -> impl Iterator<Item = &Clock> {
    heading.log_book_entries.iter().filter_map(|e| e.clock())
}

fn clock_millis(clock: &Clock) -> Option<i64> {
    let start = clock.start.to_naive_datetime()?;
    let end = clock.end.as_ref()?.to_naive_datetime()?;
    Some((end - start).num_milliseconds())
}

fn with_recursive(headings: &[Heading], own: Vec<i64>) -> Vec<ClockTotals> {
    (0..headings.len())
        .map(|index| {
            let subtree = subheadings_of(headings, index).len();
            ClockTotals {
                own: own[index],
                recursive: own[index..=index + subtree].iter().sum(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::heading::IdAllocator;
    use crate::parse::document_parser::parse_document;

    const SOURCE: &str = "* Project
:LOGBOOK:
CLOCK: [2024-01-15 Mon 10:00]--[2024-01-15 Mon 11:30] =>  1:30
:END:
** Task
:LOGBOOK:
CLOCK: [2024-01-16 Tue 09:00]--[2024-01-16 Tue 09:45] =>  0:45
CLOCK: [2024-01-17 Wed 09:00]
:END:
*** Subtask
:LOGBOOK:
CLOCK: [2024-01-20 Sat 14:00]--[2024-01-20 Sat 14:15] =>  0:15
:END:
* Other
:LOGBOOK:
CLOCK: [2024-01-15 Mon 08:00]--[2024-01-15 Mon 09:00] =>  1:00
:END:";

    const MINUTE: i64 = 60_000;

    #[test]
    fn test_own_and_recursive() {
        let doc = parse_document(SOURCE, &mut IdAllocator::new());
        let totals = clock_totals(&doc.headings);
        assert_eq!(
            totals,
            vec![
                ClockTotals { own: 90 * MINUTE, recursive: 150 * MINUTE },
                ClockTotals { own: 45 * MINUTE, recursive: 60 * MINUTE },
                ClockTotals { own: 15 * MINUTE, recursive: 15 * MINUTE },
                ClockTotals { own: 60 * MINUTE, recursive: 60 * MINUTE },
            ]
        );
    }

    #[test]
    fn test_filtered_by_date() {
        let doc = parse_document(SOURCE, &mut IdAllocator::new());
        let on_15th = |ts: &Timestamp| ts.day == "15";
        let totals = clock_totals_filtered(&doc.headings, on_15th);
        let own: Vec<i64> = totals.iter().map(|t| t.own).collect();
        assert_eq!(own, vec![90 * MINUTE, 0, 0, 60 * MINUTE]);
        assert_eq!(totals[0].recursive, 90 * MINUTE);
    }

    #[test]
    fn test_duration_comes_from_timestamps() {
        let doc = parse_document(
            concat!(
                "* a\n:LOGBOOK:\n",
                "CLOCK: [2024-01-15 Mon 10:00]--[2024-01-15 Mon 11:00] => 9:99\n",
                "CLOCK: [2024-01-16 Tue 10:00]--[2024-01-16 Tue 10:30]\n",
                "- Note taken on [2024-01-16 Tue 10:30]\n",
                ":END:"
            ),
            &mut IdAllocator::new(),
        );
        assert_eq!(total_time_logged(&doc.headings[0]), 90 * MINUTE);
    }

    #[test]
    fn test_indented_logbook_counts() {
        let doc = parse_document(
            concat!(
                "* a\n",
                "  :LOGBOOK:\n",
                "  CLOCK: [2024-01-15 Mon 10:00]--[2024-01-15 Mon 11:00] =>  1:00\n",
                "  :END:\n",
                "* b\n",
                "- noted\n",
                ":LOGBOOK:\n",
                "CLOCK: [2024-01-15 Mon 12:00]--[2024-01-15 Mon 12:20] =>  0:20\n",
                ":END:"
            ),
            &mut IdAllocator::new(),
        );
        let own: Vec<i64> = clock_totals(&doc.headings).iter().map(|t| t.own).collect();
        assert_eq!(own, vec![60 * MINUTE, 20 * MINUTE]);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65 * MINUTE), "1:05");
        assert_eq!(format_duration(27 * 60 * MINUTE + 30 * MINUTE), "27:30");
    }
}
