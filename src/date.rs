//! date.rs
//!
//! Report dates. Exported reports carry their date in the file name as
//! `YYYY-MM-DD`; these helpers pull it out and render it for display.
//!
//! # Overview
//!
//! - **`report_date_from_name(name)`**: First valid `YYYY-MM-DD` in a file name.
//! - **`iso_to_display(iso)`**: `2024-03-10` becomes `10-03-2024`.
//! - **`is_sunday(date)`**: Reports are taken on Sundays; anything else is
//!   worth a warning upstream.

use chrono::{Datelike, NaiveDate, Weekday};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
    static ref ISO_DATE_EXACT: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();
}

/// Finds the report date embedded in a file name.
///
/// Only the first `YYYY-MM-DD` run is considered; if it is not a real
/// calendar date the result is `None`.
///
/// ```
/// # use checkin_resumen::date::report_date_from_name;
/// let d = report_date_from_name("checkins-2024-03-10.pdf").unwrap();
/// assert_eq!(d.to_string(), "2024-03-10");
/// assert!(report_date_from_name("checkins.pdf").is_none());
/// ```
pub fn report_date_from_name(name: &str) -> Option<NaiveDate> {
    let m = ISO_DATE.find(name)?;
    NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok()
}

/// Rearranges an ISO date string as `DD-MM-YYYY`. Anything that is not
/// exactly `YYYY-MM-DD` yields an empty string.
pub fn iso_to_display(iso: &str) -> String {
    match ISO_DATE_EXACT.captures(iso) {
        Some(caps) => format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]),
        None => String::new(),
    }
}

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}
