//! error.rs
//!
//! Error types for the crate. Classification itself never fails on noisy
//! input; these only surface from the standalone time parser, from
//! configuration loading and from the I/O done by the front end.

use std::io;
use std::path::PathBuf;

/// A token handed to [`crate::time::parse_12h_to_minutes`] that is not a
/// valid 12-hour clock time.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("invalid time '{0}': expected <hour>[:<minute>]<a|p>[m]")]
    InvalidFormat(String),
    #[error("invalid time '{token}': hour {hour} is outside 1..=12")]
    HourOutOfRange { token: String, hour: u32 },
    #[error("invalid time '{token}': minute {minute} is outside 0..=59")]
    MinuteOutOfRange { token: String, minute: u32 },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed reading '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed parsing configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid time in '{field}': {source}")]
    Time {
        field: String,
        source: TimeParseError,
    },
    #[error("service {0} is configured more than once")]
    DuplicateService(String),
    #[error("service {0} is missing from the configuration")]
    MissingService(String),
    #[error("service {key}: total window starts after it ends")]
    EmptyWindow { key: String },
    #[error("unknown service key '{0}'")]
    UnknownService(String),
    #[error("area pattern table is empty")]
    EmptyAreaTable,
    #[error("no area block prefixes configured")]
    NoBlockPrefixes,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Time(#[from] TimeParseError),
    #[error("failed writing json: {0}")]
    Json(#[from] serde_json::Error),
}
