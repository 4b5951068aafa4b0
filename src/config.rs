//! config.rs
//!
//! The two tunables of the classifier, the service table and the area
//! table, plus the counting policy. The built-in values are
//! [`ReportConfig::default`]; a deployment can override any part from a
//! TOML document:
//!
//! ```toml
//! counting = "section"            # or "window"
//! block_prefixes = ["Voluntarios CDV > ", "Kids > "]
//!
//! [[services]]
//! key = "SUN_8A"
//! heading = "Sunday 8:00a"
//! to = "8:00a"                    # no `from`: unbounded below
//! late_after = "7:00a"
//!
//! [[areas]]
//! pattern = "Voluntarios CDV > Contabilidad"
//! name = "Contabilidad"
//! ```
//!
//! Sections left out keep their built-in value. A configuration is
//! validated once when loaded and never changes afterwards.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::checkins::areas::{AreaPatternEntry, AreaPatternTable};
use crate::checkins::classifier::CountingPolicy;
use crate::checkins::services::{ServiceKey, ServiceRegistry, ServiceTimeConfig, TotalWindow};
use crate::error::ConfigError;
use crate::time::parse_12h_to_minutes;

#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub services: ServiceRegistry,
    pub areas: AreaPatternTable,
    pub counting: CountingPolicy,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    counting: CountingPolicy,
    block_prefixes: Option<Vec<String>>,
    services: Option<Vec<RawService>>,
    areas: Option<Vec<AreaPatternEntry>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawService {
    key: ServiceKey,
    heading: String,
    from: Option<String>,
    to: String,
    late_after: String,
}

fn minutes(key: ServiceKey, field: &str, value: &str) -> Result<u32, ConfigError> {
    parse_12h_to_minutes(value).map_err(|source| ConfigError::Time {
        field: format!("services.{}.{}", key, field),
        source,
    })
}

impl RawService {
    fn into_config(self) -> Result<ServiceTimeConfig, ConfigError> {
        let from = match &self.from {
            Some(f) => Some(minutes(self.key, "from", f)?),
            None => None,
        };
        Ok(ServiceTimeConfig {
            key: self.key,
            total: TotalWindow {
                from,
                to: minutes(self.key, "to", &self.to)?,
            },
            late_after: minutes(self.key, "late_after", &self.late_after)?,
            heading: self.heading.trim().to_string(),
        })
    }
}

impl ReportConfig {
    /// Builds a configuration from a TOML document.
    ///
    /// Every top-level key is optional. A missing key keeps the built-in
    /// value:
    /// - `services` replaces the whole registry, which must then name each
    ///   of the three services exactly once;
    /// - `areas` and `block_prefixes` replace the pattern table and the
    ///   block prefixes independently;
    /// - `counting` defaults to `"section"`.
    ///
    /// # Arguments
    ///
    /// * `s` - The TOML text.
    ///
    /// # Returns
    ///
    /// * `Ok(ReportConfig)` when the document parses and validates.
    /// * `Err(ConfigError)` on a TOML error, an unknown key, a bad time, a
    ///   duplicate or missing service, an inverted window or an empty table.
    ///
    /// # Examples
    ///
    /// ```
    /// use checkin_resumen::{CountingPolicy, ReportConfig};
    ///
    /// let config = ReportConfig::from_toml_str("counting = \"window\"").unwrap();
    /// assert_eq!(config.counting, CountingPolicy::Window);
    /// assert_eq!(config.areas.entries().len(), 33);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(s)?;
        let defaults = ReportConfig::default();

        // Each service converts its times first, then the registry checks
        // the set as a whole.
        let services = match raw.services {
            Some(list) => ServiceRegistry::new(
                list.into_iter()
                    .map(RawService::into_config)
                    .collect::<Result<Vec<_>, _>>()?,
            )?,
            None => defaults.services,
        };

        // Either half of the area table may be given on its own.
        let areas = match (raw.areas, raw.block_prefixes) {
            (None, None) => defaults.areas,
            (entries, prefixes) => AreaPatternTable::new(
                entries.unwrap_or_else(|| defaults.areas.entries().to_vec()),
                prefixes.unwrap_or_else(|| defaults.areas.block_prefixes().to_vec()),
            )?,
        };

        Ok(ReportConfig {
            services,
            areas,
            counting: raw.counting,
        })
    }

    /// Reads and parses a TOML configuration file, see
    /// [`ReportConfig::from_toml_str`].
    ///
    /// # Arguments
    ///
    /// * `path` - A path-like value naming the file.
    ///
    /// # Returns
    ///
    /// * `Ok(ReportConfig)` if the file is read and valid.
    /// * `Err(ConfigError::Read)` if it cannot be read, or any error of
    ///   `from_toml_str`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(
            "loaded configuration from '{}': {} area patterns, counting by {:?}",
            path.display(),
            config.areas.entries().len(),
            config.counting
        );
        Ok(config)
    }
}
