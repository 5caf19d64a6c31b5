//! Working with instants on the single, implicit local clock used for schedules.
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use log::warn;

/// Formats accepted when parsing an instant with a time of day
const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// The format used for instants in the exported timetable
pub const TIMETABLE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// The hour of day at which a schedule starts if no start instant is given
const DEFAULT_START_HOUR: i64 = 8;

/// Parse an instant, returning `None` if the string is not in a recognised format.
///
/// A date without a time of day is taken to mean midnight.
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    INSTANT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// The current instant on the local clock
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse an instant, falling back on the current instant if it cannot be parsed
pub fn parse_instant_or_now(s: &str) -> NaiveDateTime {
    parse_instant(s).unwrap_or_else(|| {
        warn!("Could not parse instant \"{s}\"; using the current time instead");
        now()
    })
}

/// The default start instant for a schedule: today at 08:00
pub fn default_start() -> NaiveDateTime {
    let time = NaiveTime::MIN + TimeDelta::hours(DEFAULT_START_HOUR);
    Local::now().date_naive().and_time(time)
}

/// Add a number of calendar months to an instant.
///
/// The month number is advanced and the day of month and time of day are kept. If the day does
/// not exist in the target month, the surplus days carry over into the following month, so that
/// 31 January plus one month is 2 March in a leap year.
///
/// Returns `None` if the result is out of range.
pub fn add_months(instant: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    let month0 = instant.month0().checked_add(months)?;
    let year = instant.year().checked_add(i32::try_from(month0 / 12).ok()?)?;
    let first_of_month = NaiveDate::from_ymd_opt(year, month0 % 12 + 1, 1)?;
    let date = first_of_month.checked_add_days(chrono::Days::new(u64::from(instant.day0())))?;

    Some(date.and_time(instant.time()))
}

/// The horizon for a schedule: the start instant plus a number of calendar months
pub fn horizon_from_months(start: NaiveDateTime, months: u32) -> NaiveDateTime {
    add_months(start, months).unwrap_or(NaiveDateTime::MAX)
}

/// Add a duration to an instant, saturating at the limits of the representable range
pub fn add_saturating(instant: NaiveDateTime, delta: TimeDelta) -> NaiveDateTime {
    instant.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    })
}

/// Format an instant for display in the timetable
pub fn format_for_timetable(instant: NaiveDateTime) -> String {
    instant.format(TIMETABLE_FORMAT).to_string()
}
