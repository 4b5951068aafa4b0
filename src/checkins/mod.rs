//! checkins/mod.rs
//!
//! Check-in report classification. The pipeline, leaves first:
//!
//! - `services`: the three Sunday slots and heading resolution,
//! - `areas`: the path-to-area dictionary with longest-match lookup,
//! - `sections`: section and area-block splitting,
//! - `classifier`: arrival scanning and per-area counting,
//! - `resumen` / `payload`: result types and shaping for consumers.

pub mod areas;
pub mod classifier;
pub mod payload;
pub mod resumen;
pub mod sections;
pub mod services;

pub use classifier::{classify_with, parse_report_text, Classifier, CountingPolicy};
pub use resumen::{AreaResumen, ServiceResumenes};
pub use services::{ServiceKey, ServiceTimeConfig};
