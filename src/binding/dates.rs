//! Conversions between stored date/time values and the parts carried by date, time
//! and date-time groups.

use crate::config::DateStorage;
use crate::value::{DateParts, DateTimeParts, FormValue, TimeParts, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Builds the stored form of a date, or `None` if the parts are not a calendar date.
pub fn join_date(parts: &DateParts, storage: DateStorage) -> Option<Value> {
    parts.to_date().map(|date| store_date(date, storage))
}

/// Builds the stored form of a time of day. Times are always stored as `HH:MM:SS` text.
pub fn join_time(parts: &TimeParts) -> Option<Value> {
    parts.to_time().map(store_time)
}

pub fn join_datetime(parts: &DateTimeParts, storage: DateStorage) -> Option<Value> {
    parts
        .to_datetime()
        .map(|datetime| store_datetime(datetime, storage))
}

pub fn store_date(date: NaiveDate, storage: DateStorage) -> Value {
    match storage {
        DateStorage::Iso => Value::Text(date.format(DATE_FORMAT).to_string()),
        DateStorage::Timestamp => Value::Integer(
            NaiveDateTime::new(date, NaiveTime::default())
                .and_utc()
                .timestamp(),
        ),
    }
}

pub fn store_time(time: NaiveTime) -> Value {
    Value::Text(time.format(TIME_FORMAT).to_string())
}

pub fn store_datetime(datetime: NaiveDateTime, storage: DateStorage) -> Value {
    match storage {
        DateStorage::Iso => Value::Text(datetime.format(DATETIME_FORMAT).to_string()),
        DateStorage::Timestamp => Value::Integer(datetime.and_utc().timestamp()),
    }
}

/// Splits a stored date into day/month/year parts for a date group.
///
/// `Null` and empty text stay scalar nulls. A value that cannot be read as a date
/// falls back to the date of `now`.
pub fn split_date(value: &Value, now: NaiveDateTime) -> FormValue {
    if is_unset(value) {
        return FormValue::Scalar(Value::Null);
    }
    let datetime = parse_datetime(value).unwrap_or_else(|| fallback(value, now));
    FormValue::Date(datetime.date().into())
}

pub fn split_time(value: &Value, now: NaiveDateTime) -> FormValue {
    if is_unset(value) {
        return FormValue::Scalar(Value::Null);
    }
    let time = parse_time(value).unwrap_or_else(|| fallback(value, now).time());
    FormValue::Time(time.into())
}

pub fn split_datetime(value: &Value, now: NaiveDateTime) -> FormValue {
    if is_unset(value) {
        return FormValue::Scalar(Value::Null);
    }
    let datetime = parse_datetime(value).unwrap_or_else(|| fallback(value, now));
    FormValue::DateTime(datetime.into())
}

/// Reads ISO text (date only, or date and time) or a unix timestamp.
pub fn parse_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Integer(secs) => DateTime::from_timestamp(*secs, 0).map(|dt| dt.naive_utc()),
        Value::Text(text) => {
            let text = text.trim();
            NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(text, DATE_FORMAT)
                        .ok()
                        .map(|date| NaiveDateTime::new(date, NaiveTime::default()))
                })
        }
        _ => None,
    }
}

/// Reads `HH:MM:SS` or `HH:MM` text, or the time part of a date-time value.
pub fn parse_time(value: &Value) -> Option<NaiveTime> {
    if let Value::Text(text) = value {
        let text = text.trim();
        if let Ok(time) = NaiveTime::parse_from_str(text, TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        {
            return Some(time);
        }
    }
    parse_datetime(value).map(|datetime| datetime.time())
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Text(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn fallback(value: &Value, now: NaiveDateTime) -> NaiveDateTime {
    warn!(%value, "value is not a readable date, defaulting to now");
    now
}
