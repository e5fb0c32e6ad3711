//! PostgreSQL major version
//!
//! Cluster directories are keyed by major version: `14` for 10 and later,
//! `9.6` style for the old two-part majors.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PgVersion(String);

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"PostgreSQL\)?\s+(\d+)(?:\.(\d+))?").expect("version regex is valid")
    })
}

impl PgVersion {
    pub fn new(major: impl Into<String>) -> Self {
        Self(major.into())
    }

    /// Parse the major version out of `psql --version` output
    ///
    /// Returns `None` when the output carries no recognizable version.
    pub fn parse(output: &str) -> Option<Self> {
        let caps = version_regex().captures(output)?;
        let major = caps.get(1)?.as_str();
        let major_num: u32 = major.parse().ok()?;
        if major_num < 10 {
            let minor = caps.get(2)?.as_str();
            return Some(Self(format!("{major}.{minor}")));
        }
        Some(Self(major.to_string()))
    }

    /// Parse, falling back to `fallback` when nothing is recognized
    pub fn parse_or(output: &str, fallback: &str) -> Self {
        Self::parse(output).unwrap_or_else(|| Self::new(fallback))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
