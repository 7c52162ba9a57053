//! Business-hours evaluation.
//!
//! Hours are stored per weekday as `"HH:MM - HH:MM"` on a 24-hour
//! clock. A window whose closing time is earlier than its opening time
//! runs past midnight (e.g. `"23:00 - 01:00"`).

use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time, Weekday};

use crate::models::WeeklyHours;

/// Marker used for days the restaurant does not open.
pub const CLOSED_MARKER: &str = "Fechado";

const DISPLAY_DAYS: [(Weekday, &str); 7] = [
    (Weekday::Monday, "Segunda"),
    (Weekday::Tuesday, "Terça"),
    (Weekday::Wednesday, "Quarta"),
    (Weekday::Thursday, "Quinta"),
    (Weekday::Friday, "Sexta"),
    (Weekday::Saturday, "Sábado"),
    (Weekday::Sunday, "Domingo"),
];

/// Whether a location with the given hours is open at `now`.
///
/// A special-date entry for `now`'s calendar date takes precedence
/// over the weekday entry. Missing, closed or malformed entries count
/// as closed. The closing minute itself is still open.
pub fn is_open_at(hours: &WeeklyHours, now: PrimitiveDateTime) -> bool {
    let Some(entry) = entry_for(hours, now.date()) else {
        return false;
    };

    if entry.trim().eq_ignore_ascii_case(CLOSED_MARKER) {
        return false;
    }

    let Some((open, close)) = parse_window(entry) else {
        return false;
    };

    let current = minute_of_day(now.time());
    if close < open {
        current >= open || current <= close
    } else {
        open <= current && current <= close
    }
}

/// Human-readable weekly schedule, Monday first.
///
/// Days without an entry are shown as closed.
pub fn format_operating_hours(hours: &WeeklyHours) -> Vec<String> {
    DISPLAY_DAYS
        .iter()
        .map(|(weekday, label)| {
            let entry = hours.for_weekday(*weekday).unwrap_or(CLOSED_MARKER);
            format!("{label}: {entry}")
        })
        .collect()
}

fn entry_for(hours: &WeeklyHours, date: Date) -> Option<&str> {
    let format = format_description!("[year]-[month]-[day]");
    let special = hours.special_dates.iter().find(|special| {
        Date::parse(special.date.trim(), &format)
            .map(|d| d == date)
            .unwrap_or(false)
    });

    match special {
        Some(special) => Some(special.hours.as_str()),
        None => hours.for_weekday(date.weekday()),
    }
}

/// Parse `"HH:MM - HH:MM"` into opening and closing minute-of-day.
fn parse_window(entry: &str) -> Option<(u16, u16)> {
    let (open, close) = entry.split_once('-')?;
    Some((parse_clock(open.trim())?, parse_clock(close.trim())?))
}

fn parse_clock(value: &str) -> Option<u16> {
    let (hour, minute) = value.split_once(':')?;
    let hour: u16 = hour.trim().parse().ok()?;
    let minute: u16 = minute.trim().parse().ok()?;

    if hour > 23 || minute > 59 {
        return None;
    }

    Some(hour * 60 + minute)
}

fn minute_of_day(time: Time) -> u16 {
    u16::from(time.hour()) * 60 + u16::from(time.minute())
}
