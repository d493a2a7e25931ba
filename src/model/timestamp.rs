use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Unit of a repeater or warning delay: `h`, `d`, `w`, `m`, `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn as_char(self) -> char {
        match self {
            TimeUnit::Hour => 'h',
            TimeUnit::Day => 'd',
            TimeUnit::Week => 'w',
            TimeUnit::Month => 'm',
            TimeUnit::Year => 'y',
        }
    }

    pub fn from_char(c: char) -> Option<TimeUnit> {
        match c {
            'h' => Some(TimeUnit::Hour),
            'd' => Some(TimeUnit::Day),
            'w' => Some(TimeUnit::Week),
            'm' => Some(TimeUnit::Month),
            'y' => Some(TimeUnit::Year),
            _ => None,
        }
    }
}

/// How a repeating timestamp moves forward once its task is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeaterType {
    /// `+1w`: shift by exactly one interval
    Cumulate,
    /// `++1w`: shift by whole intervals until it lands on or after today
    CatchUp,
    /// `.+1w`: one interval counted from today
    Restart,
}

impl RepeaterType {
    pub fn as_str(self) -> &'static str {
        match self {
            RepeaterType::Cumulate => "+",
            RepeaterType::CatchUp => "++",
            RepeaterType::Restart => ".+",
        }
    }

    pub fn from_marker(s: &str) -> Option<RepeaterType> {
        match s {
            "+" => Some(RepeaterType::Cumulate),
            "++" => Some(RepeaterType::CatchUp),
            ".+" => Some(RepeaterType::Restart),
            _ => None,
        }
    }
}

/// Warning delay marker: `-2d` applies to every occurrence, `--2d` only to the first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayType {
    All,
    First,
}

impl DelayType {
    pub fn as_str(self) -> &'static str {
        match self {
            DelayType::All => "-",
            DelayType::First => "--",
        }
    }

    pub fn from_marker(s: &str) -> Option<DelayType> {
        match s {
            "-" => Some(DelayType::All),
            "--" => Some(DelayType::First),
            _ => None,
        }
    }
}

/// Clock time as written, e.g. `9:05` keeps `"9"` and `"05"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: String,
    pub minute: String,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Self {
        TimeOfDay {
            hour: format!("{:02}", hour),
            minute: format!("{:02}", minute),
        }
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let hour = self.hour.parse().ok()?;
        let minute = self.minute.parse().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    }
}

/// A repeater cookie such as `+1w`, `.+2d/4d`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeater {
    pub kind: RepeaterType,
    pub value: String,
    pub unit: TimeUnit,
    /// Habit deadline part of `.+2d/4d`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<(String, TimeUnit)>,
}

/// A warning delay such as `-3d`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delay {
    pub kind: DelayType,
    pub value: String,
    pub unit: TimeUnit,
}

/// An org timestamp. Date and time components are kept as the strings that
/// were written so that rendering reproduces the source exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub is_active: bool,
    pub year: String,
    pub month: String,
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeater: Option<Repeater>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<Delay>,
    /// The delay was written before the repeater (`-2d .+1w`)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub delay_first: bool,
}

impl Timestamp {
    /// Calendar date, if the written fields form a valid date
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            self.year.parse().ok()?,
            self.month.parse().ok()?,
            self.day.parse().ok()?,
        )
    }

    /// Start instant. Timestamps without a time start at midnight.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        let date = self.date()?;
        let time = match &self.start {
            Some(t) => t.to_naive_time()?,
            None => NaiveTime::from_hms_opt(0, 0, 0)?,
        };
        Some(date.and_time(time))
    }

    /// End instant of a `10:00-11:30` time range, if one is present
    pub fn end_naive_datetime(&self) -> Option<NaiveDateTime> {
        let date = self.date()?;
        Some(date.and_time(self.end.as_ref()?.to_naive_time()?))
    }

    pub fn has_time(&self) -> bool {
        self.start.is_some()
    }
}
