//! classifier.rs
//!
//! Turns report text into per-service, per-area arrival counts.
//!
//! For every section the heading picks the service; every area block in the
//! section is matched to an area name; every time token in the block that
//! is not part of a re-stated `Sunday <time>` heading is an arrival. Each
//! arrival adds one to the area's total and, when strictly after the
//! service's late threshold, one to its late count.
//!
//! Noise is dropped, never reported: an unknown heading skips its section,
//! an unmatched block is skipped, a token that is not a valid time is not
//! counted. The result is a pure function of the text and the
//! configuration.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::resumen::{AreaResumen, ServiceResumenes};
use super::sections::{split_area_blocks, split_sections};
use super::services::{ServiceKey, ServiceTimeConfig};
use crate::config::ReportConfig;
use crate::error::TimeParseError;
use crate::regex::{ends_with_word, last_chars};
use crate::text_tools::normalize;
use crate::time::parse_12h_to_minutes;

/// Chars before a time token inspected for a `sunday ` prefix.
pub const HEADING_LOOKBACK: usize = 8;

lazy_static! {
    /// `7a`, `7am`, `7:05a`, `7:05 am`, `12p`, `12:00pm`.
    /// The closing boundary is ASCII: `7:15aÁlvaro` still ends at the `a`.
    static ref ARRIVAL_TOKEN: Regex =
        Regex::new(r"(?i)\d{1,2}(?::\d{2})?\s*(?:a|am|p|pm)(?-u:\b)").unwrap();
}

/// Which arrivals count toward an area's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CountingPolicy {
    /// Every arrival in the section counts; the section decides the service.
    #[default]
    Section,
    /// Only arrivals inside the service's total window count.
    Window,
}

/// A time token found in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival<'a> {
    pub text: &'a str,
    pub minute: u32,
}

/// `true` when the token at `start` belongs to a `Sunday <time>` heading.
fn is_heading_time(block: &str, start: usize) -> bool {
    ends_with_word(last_chars(&block[..start], HEADING_LOOKBACK), "sunday")
}

/// Returns the arrival tokens of one area block in text order.
///
/// Every match of the arrival grammar is checked in two steps:
/// - a token preceded (within [`HEADING_LOOKBACK`] chars) by the word
///   `Sunday` and one whitespace char is a re-stated heading, not an arrival;
/// - the rest go through [`parse_12h_to_minutes`], and a token that fails
///   there (`13:00a`, `7:75a`) is dropped.
///
/// # Arguments
///
/// * `block` - The text of one area block, prefix included.
///
/// # Returns
///
/// The parsed arrivals, each with its matched text and minute-of-day.
///
/// # Examples
///
/// ```
/// use checkin_resumen::checkins::classifier::scan_arrivals;
///
/// let arrivals = scan_arrivals("Voluntarios CDV > Contabilidad Sunday 8:00a Ana 6:50a");
/// assert_eq!(arrivals.len(), 1);
/// assert_eq!(arrivals[0].minute, 410);
/// ```
pub fn scan_arrivals(block: &str) -> Vec<Arrival<'_>> {
    let mut arrivals = Vec::new();
    for m in ARRIVAL_TOKEN.find_iter(block) {
        if is_heading_time(block, m.start()) {
            trace!("'{}' is a service heading time, not an arrival", m.as_str());
            continue;
        }
        match parse_12h_to_minutes(m.as_str()) {
            Ok(minute) => arrivals.push(Arrival {
                text: m.as_str(),
                minute,
            }),
            Err(e) => debug!("ignoring time token: {}", e),
        }
    }
    arrivals
}

/// Per-service accumulator that remembers the order areas are first
/// matched in, whether or not that block had arrivals.
#[derive(Default)]
struct Tally {
    rows: Vec<AreaResumen>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn row(&mut self, area: &str) -> &mut AreaResumen {
        let idx = match self.index.get(area).copied() {
            Some(idx) => idx,
            None => {
                self.rows.push(AreaResumen::new(area));
                self.index.insert(area.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx]
    }

    /// Rows in first-match order; areas that never counted an arrival are
    /// left out.
    fn into_rows(self) -> Vec<AreaResumen> {
        self.rows.into_iter().filter(|r| r.total > 0).collect()
    }
}

pub struct Classifier<'c> {
    config: &'c ReportConfig,
}

impl<'c> Classifier<'c> {
    pub fn new(config: &'c ReportConfig) -> Self {
        Classifier { config }
    }

    fn counts_toward_total(&self, service: &ServiceTimeConfig, minute: u32) -> bool {
        match self.config.counting {
            CountingPolicy::Section => true,
            CountingPolicy::Window => service.in_total_window(minute),
        }
    }

    /// Classifies a whole report.
    ///
    /// Steps:
    /// 1. Split the text into sections at each `Grouped by Time: Sunday <time>`
    ///    heading and resolve the heading to a configured service. Sections
    ///    with no matching service are skipped.
    /// 2. Split each section body into area blocks at the configured block
    ///    prefixes and match each block to an area (longest pattern wins).
    ///    Unmatched blocks are skipped. A matched area takes its place in the
    ///    service's order here, before any arrival is counted.
    /// 3. Scan each matched block for arrivals (see [`scan_arrivals`]) and
    ///    count them under the counting policy: `total` for every counted
    ///    arrival, `late_count` for those strictly after the late threshold.
    ///
    /// # Arguments
    ///
    /// * `text` - The extracted report text.
    ///
    /// # Returns
    ///
    /// Per-service rows ordered by the first time each area was matched in
    /// that service. Areas with no counted arrival are absent. Noisy input
    /// never fails; at worst every list is empty.
    pub fn classify(&self, text: &str) -> ServiceResumenes {
        let mut tallies: HashMap<ServiceKey, Tally> = HashMap::new();

        for section in split_sections(text) {
            let Some(service) = self.config.services.find_by_heading(&section.heading) else {
                debug!("skipping section '{}': no service configured", section.heading);
                continue;
            };
            let tally = tallies.entry(service.key).or_default();

            for block in split_area_blocks(section.body, self.config.areas.block_prefixes()) {
                let Some(entry) = self.config.areas.match_normalized(&normalize(block)) else {
                    trace!("no area for block '{}'", block.trim());
                    continue;
                };
                // reserve the area's position even if nothing counts below
                tally.row(&entry.area);

                for arrival in scan_arrivals(block) {
                    if !self.counts_toward_total(service, arrival.minute) {
                        trace!(
                            "{} {}: '{}' outside total window",
                            service.key,
                            entry.area,
                            arrival.text
                        );
                        continue;
                    }
                    let row = tally.row(&entry.area);
                    row.total += 1;
                    if service.is_late(arrival.minute) {
                        row.late_count += 1;
                    }
                }
            }
        }

        let mut out = ServiceResumenes::default();
        for (key, tally) in tallies {
            *out.get_mut(key) = tally.into_rows();
        }
        out
    }
}

/// Classifies `text` with the built-in service and area tables.
pub fn parse_report_text(text: &str) -> ServiceResumenes {
    classify_with(text, &ReportConfig::default())
}

/// Classifies `text` with an explicit configuration.
pub fn classify_with(text: &str, config: &ReportConfig) -> ServiceResumenes {
    Classifier::new(config).classify(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub total: u32,
    pub late: u32,
}

/// Classifies arrival times already attributed to one service. Only
/// arrivals inside the total window count; the late count is the in-window
/// subset strictly after the threshold. A malformed time is an error here.
pub fn classify_arrivals_for_service<I, S>(
    arrivals: I,
    service: &ServiceTimeConfig,
) -> Result<Classification, TimeParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = Classification::default();
    for a in arrivals {
        let m = parse_12h_to_minutes(a.as_ref())?;
        if service.in_total_window(m) {
            result.total += 1;
            if service.is_late(m) {
                result.late += 1;
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkins::areas::{AreaPatternEntry, AreaPatternTable, DEFAULT_BLOCK_PREFIXES};
    use crate::checkins::services::SERVICE_TIMES;

    fn row(area: &str, total: u32, late: u32) -> AreaResumen {
        AreaResumen {
            area: area.to_string(),
            total,
            late_count: late,
        }
    }

    #[test]
    fn test_end_to_end_first_service() {
        let text = "Grouped by Time: Sunday 8:00a\nVoluntarios CDV > Alabanzas > 7:15a 7:45a Voluntarios CDV > Contabilidad 6:50a";
        let res = parse_report_text(text);
        assert_eq!(
            res.sun_8a,
            vec![row("Alabanza", 2, 2), row("Contabilidad", 1, 0)]
        );
        assert!(res.sun_10a.is_empty());
        assert!(res.sun_12p.is_empty());
    }

    #[test]
    fn test_no_headings_gives_empty_result() {
        assert_eq!(parse_report_text(""), ServiceResumenes::default());
        assert_eq!(
            parse_report_text("Voluntarios CDV > Contabilidad 6:50a 7:10a"),
            ServiceResumenes::default()
        );
    }

    #[test]
    fn test_heading_times_are_not_arrivals() {
        let text = "Grouped by Time: Sunday 10:00a Voluntarios CDV > Producción Lince > Sonido Sunday 10:00a 9:10a 9:45a";
        let res = parse_report_text(text);
        assert_eq!(res.sun_10a, vec![row("Sonido", 2, 1)]);
    }

    #[test]
    fn test_scan_arrivals() {
        let arrivals = scan_arrivals("Juan Sunday 8:00a 7:05 am, 7a; 13:00a Sunday  7:30a");
        let minutes: Vec<u32> = arrivals.iter().map(|a| a.minute).collect();
        // "13:00a" does not parse; two spaces after Sunday is not a heading
        assert_eq!(minutes, vec![425, 420, 450]);
        assert_eq!(arrivals[0].text, "7:05 am");
    }

    #[test]
    fn test_lookback_window_is_eight_chars() {
        // the window before the token is "xsunday " -> no word boundary
        assert_eq!(scan_arrivals("xsunday 8:00a").len(), 1);
        assert_eq!(scan_arrivals("x sunday 8:00a").len(), 0);
    }

    #[test]
    fn test_sections_route_to_services() {
        let text = concat!(
            "Grouped by Time: Sunday 8:00a Voluntarios CDV > CDV LINCE > Seguridad 6:30a 7:01a ",
            "Grouped by Time: Sunday 10:00a Voluntarios CDV > CDV LINCE > Seguridad 9:00a 9:31a 9:30a ",
            "Grouped by Time: Sunday 12:00p Voluntarios CDV > CDV LINCE > Seguridad 11:45a 12:05p ",
            "Kids > Bebes - Lince 11:00a"
        );
        let res = parse_report_text(text);
        assert_eq!(res.sun_8a, vec![row("Seguridad", 2, 1)]);
        assert_eq!(res.sun_10a, vec![row("Seguridad", 3, 1)]);
        assert_eq!(res.sun_12p, vec![row("Seguridad", 2, 2)]);
    }

    #[test]
    fn test_unknown_section_and_blocks_are_skipped() {
        let text = concat!(
            "Grouped by Time: Sunday 6:00p Voluntarios CDV > Contabilidad 5:50p ",
            "Grouped by Time: Sunday 8:00a Voluntarios CDV > Desconocido 7:40a ",
            "Voluntarios CDV > Contabilidad 7:50a"
        );
        let res = parse_report_text(text);
        assert_eq!(res.sun_8a, vec![row("Contabilidad", 1, 1)]);
        assert!(res.sun_10a.is_empty() && res.sun_12p.is_empty());
    }

    #[test]
    fn test_areas_without_arrivals_are_absent() {
        let res = parse_report_text("Grouped by Time: Sunday 8:00a Voluntarios CDV > Contabilidad sin hora");
        assert!(res.sun_8a.is_empty());
    }

    #[test]
    fn test_order_follows_first_match_even_without_arrivals() {
        let text = concat!(
            "Grouped by Time: Sunday 8:00a Voluntarios CDV > Contabilidad ",
            "Voluntarios CDV > Producción Lince > Sonido 7:10a ",
            "Voluntarios CDV > Contabilidad 6:50a"
        );
        let res = parse_report_text(text);
        assert_eq!(
            res.sun_8a,
            vec![row("Contabilidad", 1, 0), row("Sonido", 1, 1)]
        );
    }

    #[test]
    fn test_window_policy_drops_areas_with_nothing_in_window() {
        let mut config = ReportConfig::default();
        config.counting = CountingPolicy::Window;
        let text = concat!(
            "Grouped by Time: Sunday 10:00a Voluntarios CDV > Contabilidad 8:00a ",
            "Voluntarios CDV > CDV LINCE > Reps 9:10a"
        );
        let res = classify_with(text, &config);
        assert_eq!(res.sun_10a, vec![row("Reps", 1, 0)]);
    }

    #[test]
    fn test_token_ends_before_accented_letter() {
        let text = "Grouped by Time: Sunday 8:00a Voluntarios CDV > Contabilidad Juan 7:15aÁlvaro 7:20a";
        let res = parse_report_text(text);
        assert_eq!(res.sun_8a, vec![row("Contabilidad", 2, 2)]);

        let arrivals = scan_arrivals("Juan 7:15aÁlvaro 6:40amÑandú 7pmx");
        let texts: Vec<&str> = arrivals.iter().map(|a| a.text).collect();
        // "7pmx" runs into an ASCII letter, so there is no boundary
        assert_eq!(texts, vec!["7:15a", "6:40am"]);
    }

    #[test]
    fn test_insertion_order_and_accumulation_across_sections() {
        let text = concat!(
            "Grouped by Time: Sunday 8:00a Voluntarios CDV > Producción Lince > Sonido 7:10a ",
            "Voluntarios CDV > CDV LINCE > Reps 6:00a ",
            "Grouped by Time: Sunday 8:00a Voluntarios CDV > CDV LINCE > Reps 6:10a ",
            "Voluntarios CDV > Producción Lince > Luces 6:20a"
        );
        let res = parse_report_text(text);
        assert_eq!(
            res.sun_8a,
            vec![row("Sonido", 1, 1), row("Reps", 2, 0), row("Luces", 1, 0)]
        );
    }

    #[test]
    fn test_aliases_accumulate_into_one_area() {
        let mut config = ReportConfig::default();
        config.areas = AreaPatternTable::new(
            vec![
                AreaPatternEntry::new("Kids > Bebes - Lince", "Kids"),
                AreaPatternEntry::new("Voluntarios CDV > Kids Voluntarios", "Kids"),
            ],
            DEFAULT_BLOCK_PREFIXES.iter().map(|p| p.to_string()).collect(),
        )
        .unwrap();
        let text = "Grouped by Time: Sunday 10:00a Kids > Bebes - Lince 9:00a Voluntarios CDV > Kids Voluntarios 9:45a";
        let res = classify_with(text, &config);
        assert_eq!(res.sun_10a, vec![row("Kids", 2, 1)]);
    }

    #[test]
    fn test_window_policy_gates_total() {
        let text = "Grouped by Time: Sunday 10:00a Voluntarios CDV > Contabilidad 8:30a 9:00a 9:45a 10:00a 10:15a";
        let section = parse_report_text(text);
        assert_eq!(section.sun_10a, vec![row("Contabilidad", 5, 3)]);

        let mut config = ReportConfig::default();
        config.counting = CountingPolicy::Window;
        let window = classify_with(text, &config);
        assert_eq!(window.sun_10a, vec![row("Contabilidad", 3, 2)]);
    }

    #[test]
    fn test_late_never_exceeds_total_and_idempotent() {
        let text = concat!(
            "Grouped by Time: Sunday 8:00a Voluntarios CDV > Alabanzas > 7:15a 7:45a 6:00a ",
            "Voluntarios CDV > Alabanzas > Asistente de equipo 7:59a ",
            "Grouped by Time: Sunday 12:00p Voluntarios CDV > Eventos > Sala Verde 11:31a 11:30a 10:00a"
        );
        let first = parse_report_text(text);
        let second = parse_report_text(text);
        assert_eq!(first, second);
        for (_, rows) in first.iter() {
            for r in rows {
                assert!(r.late_count <= r.total);
            }
        }
        assert_eq!(
            first.sun_8a,
            vec![row("Alabanza", 3, 2), row("Asistente de equipo", 1, 1)]
        );
        assert_eq!(first.sun_12p, vec![row("Sala Verde", 3, 1)]);
    }

    #[test]
    fn test_unaccented_source_matches_accented_pattern() {
        let text = "Grouped by Time: Sunday 12:00p Voluntarios CDV > Produccion Lince > Atmosfera 11:40a";
        let res = parse_report_text(text);
        assert_eq!(res.sun_12p, vec![row("Atmósfera", 1, 1)]);
    }

    #[test]
    fn test_classify_arrivals_for_service() {
        let cfg = SERVICE_TIMES.get(ServiceKey::Sun10a);
        let c = classify_arrivals_for_service(["8:59a", "9:00a", "9:30a", "9:31a", "10:00a", "10:01a"], cfg)
            .unwrap();
        assert_eq!(c, Classification { total: 4, late: 2 });

        let first = SERVICE_TIMES.get(ServiceKey::Sun8a);
        let c = classify_arrivals_for_service(vec!["5:00a".to_string(), "7:01a".to_string()], first).unwrap();
        assert_eq!(c, Classification { total: 2, late: 1 });

        assert!(classify_arrivals_for_service(["9:00"], cfg).is_err());
    }
}
