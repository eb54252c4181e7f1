use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The day/month/year triple a date-group widget works with.
///
/// The parts are kept exactly as submitted; `to_date` performs the calendar check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateParts {
    #[serde(alias = "Y", deserialize_with = "numeric_part")]
    pub year: i32,
    #[serde(alias = "M", alias = "m", deserialize_with = "numeric_part")]
    pub month: u32,
    #[serde(alias = "d", deserialize_with = "numeric_part")]
    pub day: u32,
}

impl DateParts {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Returns the date if the parts form a valid calendar date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DateParts {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for DateParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {}, month {}, year {}",
            PartDisplay(self.day),
            PartDisplay(self.month),
            PartDisplay(self.year)
        )
    }
}

/// The hour/minute/second triple a time-group widget works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeParts {
    #[serde(alias = "H", alias = "h", deserialize_with = "numeric_part")]
    pub hour: u32,
    #[serde(alias = "i", deserialize_with = "numeric_part")]
    pub minute: u32,
    #[serde(alias = "s", default, deserialize_with = "numeric_part")]
    pub second: u32,
}

impl TimeParts {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn to_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, self.second)
    }
}

impl From<NaiveTime> for TimeParts {
    fn from(time: NaiveTime) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hour {}, minute {}, second {}",
            PartDisplay(self.hour),
            PartDisplay(self.minute),
            PartDisplay(self.second)
        )
    }
}

/// Date and time parts submitted together by a date-time group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateTimeParts {
    #[serde(flatten)]
    pub date: DateParts,
    #[serde(flatten)]
    pub time: TimeParts,
}

impl DateTimeParts {
    pub fn new(date: DateParts, time: TimeParts) -> Self {
        Self { date, time }
    }

    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.date.to_date()?, self.time.to_time()?))
    }
}

impl From<NaiveDateTime> for DateTimeParts {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::new(datetime.date().into(), datetime.time().into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPart {
    Number(i64),
    Text(String),
    Other(de::IgnoredAny),
}

/// A part value no calendar or clock accepts.
trait Part: TryFrom<i64> {
    const MALFORMED: Self;
}

impl Part for i32 {
    const MALFORMED: Self = i32::MAX;
}

impl Part for u32 {
    const MALFORMED: Self = u32::MAX;
}

/// Accepts a part either as a JSON number or as a numeric string, since browsers post strings.
///
/// A blank, non-numeric or out-of-range part becomes `Part::MALFORMED`, so the submission
/// still parses and the calendar check in `to_date`/`to_time` rejects it at bind time.
fn numeric_part<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Part,
{
    let number = match RawPart::deserialize(deserializer)? {
        RawPart::Number(n) => Some(n),
        RawPart::Text(s) => s.trim().parse::<i64>().ok(),
        RawPart::Other(_) => None,
    };
    Ok(number
        .and_then(|n| T::try_from(n).ok())
        .unwrap_or(T::MALFORMED))
}

struct PartDisplay<T>(T);

impl<T: Part + PartialEq + fmt::Display + Copy> fmt::Display for PartDisplay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == T::MALFORMED {
            write!(f, "(missing)")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
