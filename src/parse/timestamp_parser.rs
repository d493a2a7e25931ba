use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::timestamp::{
    Delay, DelayType, Repeater, RepeaterType, TimeOfDay, TimeUnit, Timestamp,
};

/// Unanchored, capture-free form of a single timestamp, for scanning text
pub(crate) const TIMESTAMP_SCAN: &str = r"[<\[]\d{4}-\d{2}-\d{2}(?: \p{L}[^\s\d>\]+\-]*)?(?: \d{1,2}:\d{2}(?:-\d{1,2}:\d{2})?)?(?: --?\d+[hdwmy])?(?: (?:\+\+|\.\+|\+)\d+[hdwmy](?:/\d+[hdwmy])?)?(?: --?\d+[hdwmy])?[>\]]";

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<open>[<\[])",
        r"(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})",
        r"(?: (?P<day_name>\p{L}[^\s\d>\]+\-]*))?",
        r"(?: (?P<start_hour>\d{1,2}):(?P<start_minute>\d{2})(?:-(?P<end_hour>\d{1,2}):(?P<end_minute>\d{2}))?)?",
        r"(?: (?P<early_delay_type>--|-)(?P<early_delay_value>\d+)(?P<early_delay_unit>[hdwmy]))?",
        r"(?: (?P<repeater_type>\+\+|\.\+|\+)(?P<repeater_value>\d+)(?P<repeater_unit>[hdwmy])(?:/(?P<deadline_value>\d+)(?P<deadline_unit>[hdwmy]))?)?",
        r"(?: (?P<delay_type>--|-)(?P<delay_value>\d+)(?P<delay_unit>[hdwmy]))?",
        r"(?P<close>[>\]])$",
    ))
    .unwrap()
});

/// Parse a single timestamp that spans the whole of `text`.
/// Returns `None` for malformed or mismatched brackets.
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let caps = TIMESTAMP_RE.captures(text)?;
    let is_active = match (&caps["open"], &caps["close"]) {
        ("<", ">") => true,
        ("[", "]") => false,
        _ => return None,
    };

    let start = time_of_day(&caps, "start_hour", "start_minute");
    let end = time_of_day(&caps, "end_hour", "end_minute");

    let repeater = match (
        caps.name("repeater_type"),
        caps.name("repeater_value"),
        caps.name("repeater_unit"),
    ) {
        (Some(kind), Some(value), Some(unit)) => Some(Repeater {
            kind: RepeaterType::from_marker(kind.as_str())?,
            value: value.as_str().to_string(),
            unit: unit_of(unit.as_str())?,
            deadline: match (caps.name("deadline_value"), caps.name("deadline_unit")) {
                (Some(v), Some(u)) => Some((v.as_str().to_string(), unit_of(u.as_str())?)),
                _ => None,
            },
        }),
        _ => None,
    };

    // The delay may be written before or after the repeater, but only once
    let early = delay_of(&caps, "early_delay")?;
    let late = delay_of(&caps, "delay")?;
    let (delay, delay_first) = match (early, late) {
        (Some(_), Some(_)) => return None,
        (Some(early), None) => (Some(early), repeater.is_some()),
        (None, late) => (late, false),
    };

    Some(Timestamp {
        is_active,
        year: caps["year"].to_string(),
        month: caps["month"].to_string(),
        day: caps["day"].to_string(),
        day_name: caps.name("day_name").map(|m| m.as_str().to_string()),
        start,
        end,
        repeater,
        delay,
        delay_first,
    })
}

/// Parse `<a>` or a `<a>--<b>` range spanning the whole of `text`
pub fn parse_timestamp_range(text: &str) -> Option<(Timestamp, Option<Timestamp>)> {
    if let Some(ts) = parse_timestamp(text) {
        return Some((ts, None));
    }
    // The first timestamp's closing bracket is directly followed by `--`
    let split = text
        .match_indices("--")
        .map(|(i, _)| i)
        .find(|&i| i > 0 && matches!(text.as_bytes()[i - 1], b'>' | b']'))?;
    let first = parse_timestamp(&text[..split])?;
    let second = parse_timestamp(&text[split + 2..])?;
    Some((first, Some(second)))
}

fn time_of_day(caps: &Captures, hour: &str, minute: &str) -> Option<TimeOfDay> {
    Some(TimeOfDay {
        hour: caps.name(hour)?.as_str().to_string(),
        minute: caps.name(minute)?.as_str().to_string(),
    })
}

/// `Some(None)` when the delay group did not match, `None` when it
/// matched something unreadable
fn delay_of(caps: &Captures, prefix: &str) -> Option<Option<Delay>> {
    let kind = caps.name(&format!("{prefix}_type"));
    let value = caps.name(&format!("{prefix}_value"));
    let unit = caps.name(&format!("{prefix}_unit"));
    match (kind, value, unit) {
        (Some(kind), Some(value), Some(unit)) => Some(Some(Delay {
            kind: DelayType::from_marker(kind.as_str())?,
            value: value.as_str().to_string(),
            unit: unit_of(unit.as_str())?,
        })),
        _ => Some(None),
    }
}

fn unit_of(s: &str) -> Option<TimeUnit> {
    s.chars().next().and_then(TimeUnit::from_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let ts = parse_timestamp("<2021-05-16>").unwrap();
        assert!(ts.is_active);
        assert_eq!(ts.year, "2021");
        assert_eq!(ts.month, "05");
        assert_eq!(ts.day, "16");
        assert_eq!(ts.day_name, None);
        assert_eq!(ts.start, None);

        let ts = parse_timestamp("[2021-05-16]").unwrap();
        assert!(!ts.is_active);
    }

    #[test]
    fn test_parse_time_range() {
        let ts = parse_timestamp("<2021-05-16 Sun 12:45-13:15>").unwrap();
        assert_eq!(ts.day_name.as_deref(), Some("Sun"));
        let start = ts.start.unwrap();
        assert_eq!((start.hour.as_str(), start.minute.as_str()), ("12", "45"));
        let end = ts.end.unwrap();
        assert_eq!((end.hour.as_str(), end.minute.as_str()), ("13", "15"));
    }

    #[test]
    fn test_parse_single_digit_hour_kept_as_written() {
        let ts = parse_timestamp("<2021-05-16 Sun 9:05>").unwrap();
        assert_eq!(ts.start.unwrap().hour, "9");
    }

    #[test]
    fn test_parse_repeater_and_delay() {
        let ts = parse_timestamp("<2021-05-16 Sun .+1w -2d>").unwrap();
        let repeater = ts.repeater.unwrap();
        assert_eq!(repeater.kind, RepeaterType::Restart);
        assert_eq!(repeater.value, "1");
        assert_eq!(repeater.unit, TimeUnit::Week);
        let delay = ts.delay.unwrap();
        assert_eq!(delay.kind, DelayType::All);
        assert_eq!(delay.value, "2");
        assert_eq!(delay.unit, TimeUnit::Day);
    }

    #[test]
    fn test_parse_habit_deadline() {
        let ts = parse_timestamp("<2021-05-16 Sun .+2d/4d>").unwrap();
        let repeater = ts.repeater.unwrap();
        assert_eq!(repeater.deadline, Some(("4".to_string(), TimeUnit::Day)));
    }

    #[test]
    fn test_parse_catch_up_and_first_delay() {
        let ts = parse_timestamp("<2021-05-16 ++1m --3d>").unwrap();
        assert_eq!(ts.repeater.unwrap().kind, RepeaterType::CatchUp);
        assert_eq!(ts.delay.unwrap().kind, DelayType::First);
    }

    #[test]
    fn test_parse_delay_before_repeater() {
        let ts = parse_timestamp("<2021-05-16 Sun -2d .+1w>").unwrap();
        assert!(ts.delay_first);
        assert_eq!(ts.repeater.unwrap().kind, RepeaterType::Restart);
        assert_eq!(ts.delay.unwrap().value, "2");

        let ts = parse_timestamp("<2021-05-16 Sun .+1w -2d>").unwrap();
        assert!(!ts.delay_first);

        // Without a repeater there is only one way to write it
        let ts = parse_timestamp("<2021-05-16 Sun -2d>").unwrap();
        assert!(!ts.delay_first);
        assert_eq!(ts.delay.unwrap().kind, DelayType::All);

        assert!(parse_timestamp("<2021-05-16 Sun -2d +1w -3d>").is_none());
    }

    #[test]
    fn test_mismatched_brackets_rejected() {
        assert!(parse_timestamp("<2021-05-16 Sun]").is_none());
        assert!(parse_timestamp("[2021-05-16 Sun>").is_none());
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(parse_timestamp("<2021-5-16>").is_none());
        assert!(parse_timestamp("<2021-05-16 Sun").is_none());
        assert!(parse_timestamp("2021-05-16").is_none());
        assert!(parse_timestamp("<2021-05-16>  ").is_none());
    }

    #[test]
    fn test_parse_range() {
        let (first, second) = parse_timestamp_range("<2021-05-16>--<2021-05-23>").unwrap();
        assert_eq!(first.day, "16");
        assert_eq!(second.unwrap().day, "23");

        let (single, none) = parse_timestamp_range("<2021-05-16>").unwrap();
        assert_eq!(single.day, "16");
        assert!(none.is_none());
    }
}
