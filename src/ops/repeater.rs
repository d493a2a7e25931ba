use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike};

use crate::model::document::{Document, TodoKeywordSet};
use crate::model::timestamp::{RepeaterType, TimeOfDay, TimeUnit, Timestamp};

/// What a TODO state change did to a heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChange {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Repeating planning items were moved forward instead of closing the task
    pub repeated: bool,
}

/// Move a repeating timestamp to its next occurrence.
///
/// `+` shifts once, `++` shifts until the timestamp is no longer before
/// `reference`, `.+` counts one interval from `reference`. Timestamps without
/// a repeater, with a zero interval, or whose date cannot be read, come back
/// unchanged.
pub fn advance_repeater(ts: &Timestamp, reference: NaiveDateTime) -> Timestamp {
    let Some(repeater) = &ts.repeater else {
        return ts.clone();
    };
    let Ok(value) = repeater.value.parse::<u32>() else {
        return ts.clone();
    };
    if value == 0 {
        return ts.clone();
    }
    let Some(current) = ts.to_naive_datetime() else {
        return ts.clone();
    };
    let unit = repeater.unit;

    let next = match repeater.kind {
        RepeaterType::Cumulate => shift(current, unit, value),
        RepeaterType::CatchUp => {
            let mut next = shift(current, unit, value);
            while let Some(candidate) = next
                && is_before(ts, candidate, reference)
            {
                next = shift(candidate, unit, value);
            }
            next
        }
        RepeaterType::Restart => match unit {
            TimeUnit::Hour => shift(reference, unit, value),
            _ => shift(reference.date().and_time(current.time()), unit, value),
        },
    };

    match next {
        Some(next) => moved_to(ts, current, next),
        None => ts.clone(),
    }
}

/// A new timestamp for `dt`, zero padded, with an English day name
pub fn timestamp_for_datetime(dt: NaiveDateTime, is_active: bool, with_time: bool) -> Timestamp {
    Timestamp {
        is_active,
        year: format!("{:04}", dt.year()),
        month: format!("{:02}", dt.month()),
        day: format!("{:02}", dt.day()),
        day_name: Some(dt.format("%a").to_string()),
        start: with_time.then(|| TimeOfDay::new(dt.hour(), dt.minute())),
        end: None,
        repeater: None,
        delay: None,
        delay_first: false,
    }
}

/// Mark the heading at `index` done, or move its repeaters forward
pub fn complete_heading(doc: &mut Document, index: usize, now: NaiveDateTime) -> Option<TodoChange> {
    let from = doc.headings.get(index)?.todo_keyword().map(str::to_string);
    let set = keyword_set(doc, from.as_deref());
    let to = set.completed_keywords.first().cloned();
    apply_todo_change(doc, index, &set, from, to, now)
}

/// Cycle the heading at `index` to the next keyword of its set
pub fn advance_todo_state(doc: &mut Document, index: usize, now: NaiveDateTime) -> Option<TodoChange> {
    let from = doc.headings.get(index)?.todo_keyword().map(str::to_string);
    let set = keyword_set(doc, from.as_deref());
    let to = match &from {
        None => set.keywords.first().cloned(),
        Some(keyword) => set
            .keywords
            .iter()
            .position(|k| k == keyword)
            .and_then(|i| set.keywords.get(i + 1))
            .cloned(),
    };
    apply_todo_change(doc, index, &set, from, to, now)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn keyword_set(doc: &Document, keyword: Option<&str>) -> TodoKeywordSet {
    keyword
        .and_then(|k| doc.todo_keyword_set_for(k))
        .or_else(|| doc.todo_keyword_sets.first())
        .cloned()
        .unwrap_or_else(TodoKeywordSet::default_set)
}

fn apply_todo_change(
    doc: &mut Document,
    index: usize,
    set: &TodoKeywordSet,
    from: Option<String>,
    to: Option<String>,
    now: NaiveDateTime,
) -> Option<TodoChange> {
    let heading = doc.headings.get_mut(index)?;
    let completing = to.as_deref().is_some_and(|k| set.is_completed(k));
    let has_repeater = heading
        .planning_items
        .iter()
        .any(|p| p.timestamp.repeater.is_some());

    if completing && has_repeater {
        for item in heading.planning_items.iter_mut() {
            if item.timestamp.repeater.is_some() {
                item.timestamp = advance_repeater(&item.timestamp, now);
            }
        }
        log::debug!("heading {} repeated instead of closing", heading.id);
        return Some(TodoChange {
            to: from.clone(),
            from,
            repeated: true,
        });
    }

    heading.title_line.todo_keyword = to.clone();
    Some(TodoChange {
        from,
        to,
        repeated: false,
    })
}

fn shift(dt: NaiveDateTime, unit: TimeUnit, value: u32) -> Option<NaiveDateTime> {
    let n = i64::from(value);
    match unit {
        TimeUnit::Hour => dt.checked_add_signed(Duration::hours(n)),
        TimeUnit::Day => dt.checked_add_signed(Duration::days(n)),
        TimeUnit::Week => dt.checked_add_signed(Duration::weeks(n)),
        TimeUnit::Month => dt.checked_add_months(Months::new(value)),
        TimeUnit::Year => dt.checked_add_months(Months::new(value.checked_mul(12)?)),
    }
}

/// Date-only timestamps compare by day
fn is_before(ts: &Timestamp, candidate: NaiveDateTime, reference: NaiveDateTime) -> bool {
    if ts.has_time() {
        candidate < reference
    } else {
        candidate.date() < reference.date()
    }
}

/// Copy of `ts` moved from `current` to `next`, keeping its written style
fn moved_to(ts: &Timestamp, current: NaiveDateTime, next: NaiveDateTime) -> Timestamp {
    let mut moved = ts.clone();
    let date: NaiveDate = next.date();
    moved.year = format!("{:04}", date.year());
    moved.month = format!("{:02}", date.month());
    moved.day = format!("{:02}", date.day());
    if moved.day_name.is_some() {
        moved.day_name = Some(date.format("%a").to_string());
    }

    if next.time() != current.time() && ts.has_time() {
        let delta = next - current;
        moved.start = Some(TimeOfDay::new(next.hour(), next.minute()));
        if let Some(end) = ts.end_naive_datetime() {
            let end = end + delta;
            moved.end = Some(TimeOfDay::new(end.hour(), end.minute()));
        }
    }
    moved
}
