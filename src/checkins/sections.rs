//! sections.rs
//!
//! Cuts the report text into service sections and each section into area
//! blocks. Neither step needs line breaks: extracted text often arrives as
//! one long line, so both work on match offsets alone.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::regex::split_before_literals;

lazy_static! {
    static ref SECTION_HEADING: Regex =
        Regex::new(r"(?i)Grouped by Time:\s*(Sunday\s+\d{1,2}:\d{2}[ap])").unwrap();
}

/// Text between one `Grouped by Time: Sunday <H>:<MM><a|p>` heading and the
/// next (or the end of the input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// `Grouped by Time: <label>`, rebuilt with a single space.
    pub heading: String,
    /// The label as it appears in the text, e.g. `Sunday 8:00a`.
    pub label: &'a str,
    /// Byte range of the raw body in the input.
    pub span: Range<usize>,
    /// The raw body, trimmed.
    pub body: &'a str,
}

/// Splits `text` into one section per heading occurrence, in input order.
/// Text before the first heading belongs to no section. No headings at all
/// gives an empty vector, which is a valid "no data" outcome.
///
/// # Arguments
///
/// * `text` - The whole extracted report.
///
/// # Returns
///
/// The sections, each borrowing its label and body from `text`.
///
/// # Examples
///
/// ```
/// use checkin_resumen::checkins::sections::split_sections;
///
/// let text = "cover page Grouped by Time: Sunday 8:00a A 7a grouped by time:  sunday 10:00a B 9a";
/// let sections = split_sections(text);
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].heading, "Grouped by Time: Sunday 8:00a");
/// assert_eq!(sections[0].body, "A 7a");
/// assert_eq!(sections[1].label, "sunday 10:00a");
/// ```
pub fn split_sections(text: &str) -> Vec<Section<'_>> {
    // (whole heading, label) ranges of every heading
    let headings: Vec<(Range<usize>, Range<usize>)> = SECTION_HEADING
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let label = caps.get(1)?;
            Some((whole.range(), label.range()))
        })
        .collect();

    let mut sections = Vec::with_capacity(headings.len());
    for (i, (whole, label)) in headings.iter().enumerate() {
        // the body runs to the next heading or the end of the text
        let end = headings
            .get(i + 1)
            .map(|(next, _)| next.start)
            .unwrap_or(text.len());
        let span = whole.end..end;
        let label = &text[label.clone()];
        sections.push(Section {
            heading: format!("Grouped by Time: {}", label),
            label,
            body: text[span.clone()].trim(),
            span,
        });
    }
    sections
}

/// Splits a section body in front of every block prefix. The first piece
/// is whatever precedes the first prefix; it usually matches no area.
pub fn split_area_blocks<'a, S: AsRef<str>>(body: &'a str, prefixes: &[S]) -> Vec<&'a str> {
    split_before_literals(body, prefixes)
}
