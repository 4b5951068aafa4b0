//! time.rs
//!
//! Minute-of-day arithmetic for 12-hour clock tokens as they appear in
//! check-in reports (`7:30a`, `12p`, `11:59pm`).
//!
//! # Overview
//!
//! - **`parse_12h_to_minutes(token)`**: Converts a token to minutes since
//!   midnight (0..=1439). Hour 12 maps to 0 before the PM offset, so
//!   `12a` is midnight and `12p` is noon.
//! - **`clock(hour, minute, pm)`**: The same conversion for literal values,
//!   usable in `const` tables.
//! - **`in_closed_range(x, a, b)`** / **`strictly_after(x, t)`**: The two
//!   comparisons the classification rules are built from.
//! - **`format_minutes(m)`**: Renders a minute-of-day as `7:30am`.

use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::TimeParseError;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

lazy_static! {
    /// `<hour>[:]<minute>?<a|p>[m]`, applied after lower-casing and
    /// stripping whitespace. The colon is optional so `730a` reads as 7:30.
    static ref TIME_12H: Regex = Regex::new(r"^(\d{1,2}):?(\d{2})?([ap])m?$").unwrap();
}

/// Converts a 12-hour clock token to minutes since midnight.
///
/// The token is trimmed, lower-cased and stripped of inner whitespace, so
/// `7:30 AM`, `7:30am` and `7:30a` all read the same. Hour 12 maps to 0
/// before the PM offset is added: `12a` is midnight and `12p` is noon.
///
/// # Arguments
///
/// * `token` - A time like `7a`, `7:30a`, `730a` or `12:00 pm`.
///
/// # Returns
///
/// * `Ok(minute)` with the minute-of-day in `0..=1439`.
/// * `Err(TimeParseError::InvalidFormat)` if the token does not fit the
///   grammar, or the hour or minute variant if one is out of range.
///
/// # Examples
///
/// ```
/// # use checkin_resumen::time::parse_12h_to_minutes;
/// assert_eq!(parse_12h_to_minutes("7:30a").unwrap(), 450);
/// assert_eq!(parse_12h_to_minutes("12p").unwrap(), 720);
/// assert_eq!(parse_12h_to_minutes("12:00 AM").unwrap(), 0);
/// assert!(parse_12h_to_minutes("13:00a").is_err());
/// ```
pub fn parse_12h_to_minutes(token: &str) -> Result<u32, TimeParseError> {
    let s: String = token
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let caps = TIME_12H
        .captures(&s)
        .ok_or_else(|| TimeParseError::InvalidFormat(token.to_string()))?;

    let hour: u32 = caps[1]
        .parse()
        .map_err(|_| TimeParseError::InvalidFormat(token.to_string()))?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| TimeParseError::InvalidFormat(token.to_string()))?,
        None => 0,
    };

    if !(1..=12).contains(&hour) {
        return Err(TimeParseError::HourOutOfRange {
            token: token.to_string(),
            hour,
        });
    }
    if minute > 59 {
        return Err(TimeParseError::MinuteOutOfRange {
            token: token.to_string(),
            minute,
        });
    }

    Ok(clock(hour, minute, &caps[3] == "p"))
}

/// Minute-of-day for a literal 12-hour time. No range checks; callers
/// pass constants.
pub const fn clock(hour: u32, minute: u32, pm: bool) -> u32 {
    let hour24 = hour % 12 + if pm { 12 } else { 0 };
    hour24 * 60 + minute
}

/// `a <= x <= b`
pub fn in_closed_range(x: u32, a: u32, b: u32) -> bool {
    x >= a && x <= b
}

/// `x > t`
pub fn strictly_after(x: u32, t: u32) -> bool {
    x > t
}

/// Converts a minute-of-day to a `NaiveTime`, wrapping past midnight.
fn minutes_to_time(minutes: u32) -> NaiveTime {
    let secs = (minutes % MINUTES_PER_DAY) * 60;
    // secs < 86400, so this never falls through
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(NaiveTime::MIN)
}

/// Renders a minute-of-day the way report labels show it, e.g. `7:00am`.
///
/// ```
/// # use checkin_resumen::time::format_minutes;
/// assert_eq!(format_minutes(420), "7:00am");
/// assert_eq!(format_minutes(690), "11:30am");
/// assert_eq!(format_minutes(720), "12:00pm");
/// ```
pub fn format_minutes(minutes: u32) -> String {
    minutes_to_time(minutes).format("%-I:%M%P").to_string()
}
