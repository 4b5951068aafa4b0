//! Per-service, per-area check-in counts from the text of a Sunday
//! check-in report.
//!
//! The input is the plain text of an exported report, in reading order.
//! It holds one `Grouped by Time: Sunday <time>` section per service slot;
//! each section lists volunteers under organizational paths such as
//! `Voluntarios CDV > Producción Lince > Sonido`, each followed by the
//! time they checked in. The output counts, for each of the three slots
//! (`SUN_8A`, `SUN_10A`, `SUN_12P`), every area's arrivals and how many
//! came after the slot's late threshold.
//!
//! # Usage
//!
//! ```
//! use checkin_resumen::{parse_report_text, ServiceKey};
//!
//! let text = "Grouped by Time: Sunday 8:00a\n\
//!             Voluntarios CDV > Alabanzas > 7:15a 7:45a \
//!             Voluntarios CDV > Contabilidad 6:50a";
//! let resumen = parse_report_text(text);
//! let rows = resumen.get(ServiceKey::Sun8a);
//! assert_eq!(rows[0].area, "Alabanza");
//! assert_eq!((rows[0].total, rows[0].late_count), (2, 2));
//! assert_eq!(rows[1].area, "Contabilidad");
//! assert!(resumen.get(ServiceKey::Sun10a).is_empty());
//! ```
//!
//! Classification never fails: text it cannot place is skipped. An empty
//! result means either that the text had no recognized headings or that
//! no arrivals were found; [`checkins::sections::split_sections`] tells the
//! two apart.

pub mod checkins;
pub mod config;
pub mod date;
pub mod error;
pub mod fileio;
pub mod regex;
pub mod text_tools;
pub mod time;

pub use checkins::{
    classify_with, parse_report_text, AreaResumen, Classifier, CountingPolicy, ServiceKey,
    ServiceResumenes, ServiceTimeConfig,
};
pub use config::ReportConfig;
pub use error::{ConfigError, Error, TimeParseError};
