use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const SECOND: i64 = 1000;
pub const MINUTE: i64 = SECOND * 60;
pub const HOUR: i64 = MINUTE * 60;
pub const DAY: i64 = HOUR * 24;

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Time remaining until the target, broken down for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    /// Floor decomposition of a millisecond span, clamped at zero.
    pub fn from_millis(diff: i64) -> Self {
        let diff = diff.max(0);
        Self {
            days: (diff / DAY) as u64,
            hours: ((diff % DAY) / HOUR) as u64,
            minutes: ((diff % HOUR) / MINUTE) as u64,
            seconds: ((diff % MINUTE) / SECOND) as u64,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// Parses an event date the way a browser `Date` would.
///
/// Date-only strings are midnight UTC, RFC 3339 strings carry their own offset,
/// and date-times without an offset are read in `tz`.
pub fn parse_target<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(input) {
        return Some(stamp.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|stamp| stamp.with_timezone(&Utc))
}

pub fn countdown(target: &str, now: DateTime<Utc>) -> Option<Countdown> {
    countdown_in(target, &Local, now)
}

/// `None` when the target cannot be parsed.
pub fn countdown_in<Tz: TimeZone>(target: &str, tz: &Tz, now: DateTime<Utc>) -> Option<Countdown> {
    let target = parse_target(target, tz)?;
    let diff = target.timestamp_millis().saturating_sub(now.timestamp_millis());
    Some(Countdown::from_millis(diff))
}

pub fn countdown_text(countdown: Option<Countdown>) -> String {
    match countdown {
        Some(Countdown {
            days,
            hours,
            minutes,
            seconds,
        }) => format!("{days} days, {hours} h, {minutes}m, {seconds}s"),
        None => String::new(),
    }
}

pub fn title_text(name: &str) -> String {
    format!("Time to {name}")
}
