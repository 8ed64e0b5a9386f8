//! Stockholm local time handling.
//!
//! The travel planner sends dates ("2024-03-15") and times ("14:30:00") as
//! separate strings in Europe/Stockholm local time, with optional real-time
//! counterparts. This module turns them into zoned timestamps.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::{Europe::Stockholm, Tz};

/// Error returned when parsing an invalid date or time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Convert any zoned timestamp to Stockholm local time.
pub fn to_stockholm<Z: TimeZone>(at: &DateTime<Z>) -> DateTime<Tz> {
    at.with_timezone(&Stockholm)
}

/// Parse a Stockholm local date ("YYYY-MM-DD") and time ("HH:MM:SS" or
/// "HH:MM").
///
/// On the autumn DST fold the earlier instant is chosen; times inside the
/// spring gap are rejected.
///
/// # Examples
///
/// ```
/// use trafiklab::domain::parse_stockholm;
///
/// let t = parse_stockholm("2024-01-15", "11:30:00").unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-01-15T11:30:00+01:00");
///
/// assert!(parse_stockholm("2024-01-15", "25:00:00").is_err());
/// ```
pub fn parse_stockholm(date: &str, time: &str) -> Result<DateTime<Tz>, TimeError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| TimeError::new("expected YYYY-MM-DD date"))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| TimeError::new("expected HH:MM:SS or HH:MM time"))?;

    Stockholm
        .from_local_datetime(&NaiveDateTime::new(date, time))
        .earliest()
        .ok_or_else(|| TimeError::new("local time does not exist in Europe/Stockholm"))
}

/// Parse an ISO 8601 duration of the form `PnDTnHnMnS`, e.g. "PT1H23M".
///
/// Year, month and week designators are not accepted.
pub fn parse_iso_duration(s: &str) -> Result<Duration, TimeError> {
    let rest = s
        .strip_prefix('P')
        .ok_or_else(|| TimeError::new("duration must start with P"))?;
    let (days, clock) = match rest.split_once('T') {
        Some((days, clock)) => (days, Some(clock)),
        None => (rest, None),
    };

    let mut total = Duration::zero();
    if !days.is_empty() {
        let n = days
            .strip_suffix('D')
            .and_then(|n| n.parse::<i64>().ok())
            .ok_or_else(|| TimeError::new("expected nD before T"))?;
        total += Duration::days(n);
    }

    if let Some(clock) = clock {
        if clock.is_empty() {
            return Err(TimeError::new("empty time part after T"));
        }
        let mut digits = String::new();
        for c in clock.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let n: i64 = digits
                .parse()
                .map_err(|_| TimeError::new("missing number in duration"))?;
            digits.clear();
            total += match c {
                'H' => Duration::hours(n),
                'M' => Duration::minutes(n),
                'S' => Duration::seconds(n),
                _ => return Err(TimeError::new("unknown duration designator")),
            };
        }
        if !digits.is_empty() {
            return Err(TimeError::new("trailing number in duration"));
        }
    } else if days.is_empty() {
        return Err(TimeError::new("empty duration"));
    }

    Ok(total)
}

/// A scheduled time together with its real-time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePair {
    /// Timetabled time
    pub scheduled: DateTime<Tz>,
    /// Real-time estimate, equal to `scheduled` when none was sent
    pub realtime: DateTime<Tz>,
}

impl TimePair {
    /// Real-time minus scheduled. Negative when running early.
    pub fn delay(&self) -> Duration {
        self.realtime.signed_duration_since(self.scheduled)
    }

    /// Whether the real-time estimate is later than the timetable.
    pub fn is_delayed(&self) -> bool {
        self.realtime > self.scheduled
    }
}

/// Parse a scheduled date/time and optional real-time date/time.
///
/// Returns `Ok(None)` when no scheduled time was sent. A missing or
/// partial real-time value falls back to the scheduled time.
pub fn parse_time_pair(
    date: Option<&str>,
    time: Option<&str>,
    rt_date: Option<&str>,
    rt_time: Option<&str>,
) -> Result<Option<TimePair>, TimeError> {
    let (Some(date), Some(time)) = (date, time) else {
        return Ok(None);
    };
    let scheduled = parse_stockholm(date, time)?;

    let realtime = match (rt_date, rt_time) {
        (Some(d), Some(t)) => parse_stockholm(d, t)?,
        // Real-time time without a date keeps the scheduled date
        (None, Some(t)) => parse_stockholm(date, t)?,
        _ => scheduled,
    };

    Ok(Some(TimePair {
        scheduled,
        realtime,
    }))
}
