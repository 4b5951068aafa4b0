//! services.rs
//!
//! The three Sunday service slots and the rules that classify an arrival
//! against each of them.
//!
//! # Overview
//!
//! - **`ServiceKey`**: `SUN_8A`, `SUN_10A`, `SUN_12P`.
//! - **`ServiceTimeConfig`**: Heading text, total window and late threshold
//!   of one slot.
//! - **`ServiceRegistry`**: Exactly one config per key. The built-in table
//!   is [`SERVICE_TIMES`]; [`ServiceRegistry::new`] validates a custom one.
//! - **`ServiceRegistry::find_by_heading(line)`**: Resolves a
//!   `Grouped by Time: <label>` line to its slot. The label must equal a
//!   configured heading exactly, ignoring case and surrounding spaces.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::time::{clock, format_minutes, in_closed_range, strictly_after};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ServiceKey {
    #[serde(rename = "SUN_8A")]
    #[value(name = "SUN_8A")]
    Sun8a,
    #[serde(rename = "SUN_10A")]
    #[value(name = "SUN_10A")]
    Sun10a,
    #[serde(rename = "SUN_12P")]
    #[value(name = "SUN_12P")]
    Sun12p,
}

impl ServiceKey {
    pub const ALL: [ServiceKey; 3] = [ServiceKey::Sun8a, ServiceKey::Sun10a, ServiceKey::Sun12p];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKey::Sun8a => "SUN_8A",
            ServiceKey::Sun10a => "SUN_10A",
            ServiceKey::Sun12p => "SUN_12P",
        }
    }

    /// Display label of the slot.
    pub fn label(self) -> &'static str {
        match self {
            ServiceKey::Sun8a => "Domingo 8:00 a.m.",
            ServiceKey::Sun10a => "Domingo 10:00 a.m.",
            ServiceKey::Sun12p => "Domingo 12:00 p.m.",
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownService(s.to_string()))
    }
}

/// Inclusive window of minutes-of-day. `from: None` is unbounded below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalWindow {
    pub from: Option<u32>,
    pub to: u32,
}

impl TotalWindow {
    pub fn contains(&self, minute: u32) -> bool {
        match self.from {
            Some(from) => in_closed_range(minute, from, self.to),
            None => minute <= self.to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTimeConfig {
    pub key: ServiceKey,
    /// Text expected after `Grouped by Time: ` in the report.
    pub heading: String,
    pub total: TotalWindow,
    /// An arrival is late when strictly after this minute.
    pub late_after: u32,
}

impl ServiceTimeConfig {
    pub fn is_late(&self, minute: u32) -> bool {
        strictly_after(minute, self.late_after)
    }

    pub fn in_total_window(&self, minute: u32) -> bool {
        self.total.contains(minute)
    }

    /// Column label for the late count, derived from the threshold.
    pub fn late_label(&self) -> String {
        format!("Llegaron después de {}", format_minutes(self.late_after))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRegistry {
    services: Vec<ServiceTimeConfig>,
}

/// Built-in service table.
pub static SERVICE_TIMES: Lazy<ServiceRegistry> = Lazy::new(ServiceRegistry::builtin);

lazy_static! {
    static ref GROUPED_BY_TIME: Regex = Regex::new(r"(?i)Grouped by Time:\s*(.+)$").unwrap();
}

impl ServiceRegistry {
    /// Validates and orders a set of service configs: every key exactly
    /// once, and no window that starts after it ends.
    pub fn new(mut services: Vec<ServiceTimeConfig>) -> Result<Self, ConfigError> {
        services.sort_by_key(|s| s.key);
        for pair in services.windows(2) {
            if pair[0].key == pair[1].key {
                return Err(ConfigError::DuplicateService(pair[0].key.to_string()));
            }
        }
        for key in ServiceKey::ALL {
            if !services.iter().any(|s| s.key == key) {
                return Err(ConfigError::MissingService(key.to_string()));
            }
        }
        for s in &services {
            if let Some(from) = s.total.from {
                if from > s.total.to {
                    return Err(ConfigError::EmptyWindow {
                        key: s.key.to_string(),
                    });
                }
            }
        }
        Ok(ServiceRegistry { services })
    }

    fn builtin() -> Self {
        ServiceRegistry {
            services: vec![
                ServiceTimeConfig {
                    key: ServiceKey::Sun8a,
                    heading: "Sunday 8:00a".to_string(),
                    total: TotalWindow {
                        from: None,
                        to: clock(8, 0, false),
                    },
                    late_after: clock(7, 0, false),
                },
                ServiceTimeConfig {
                    key: ServiceKey::Sun10a,
                    heading: "Sunday 10:00a".to_string(),
                    total: TotalWindow {
                        from: Some(clock(9, 0, false)),
                        to: clock(10, 0, false),
                    },
                    late_after: clock(9, 30, false),
                },
                ServiceTimeConfig {
                    key: ServiceKey::Sun12p,
                    heading: "Sunday 12:00p".to_string(),
                    total: TotalWindow {
                        from: Some(clock(11, 0, false)),
                        to: clock(12, 0, true),
                    },
                    late_after: clock(11, 30, false),
                },
            ],
        }
    }

    pub fn get(&self, key: ServiceKey) -> &ServiceTimeConfig {
        // `new` and `builtin` guarantee one entry per key
        self.services
            .iter()
            .find(|s| s.key == key)
            .unwrap_or(&self.services[0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceTimeConfig> {
        self.services.iter()
    }

    /// Looks up the slot whose heading equals `label` (trimmed, any case).
    pub fn find_by_label(&self, label: &str) -> Option<&ServiceTimeConfig> {
        let head = label.trim().to_lowercase();
        self.services
            .iter()
            .find(|s| s.heading.to_lowercase() == head)
    }

    /// Resolves a full `Grouped by Time: <label>` line. Lines without the
    /// prefix, and labels no slot is configured for, give `None`.
    pub fn find_by_heading(&self, heading_line: &str) -> Option<&ServiceTimeConfig> {
        let caps = GROUPED_BY_TIME.captures(heading_line.trim())?;
        self.find_by_label(&caps[1])
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        SERVICE_TIMES.clone()
    }
}
