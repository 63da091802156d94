//! Package versions and version gates.
//!
//! Recipes pick between mutually exclusive option sets by comparing the
//! package version against fixed thresholds:
//!
//! ```
//! use levitate_easyblock::version::{Version, VersionGate};
//!
//! const BEFORE_9: VersionGate = VersionGate::lt(Version::new(9, 0, 0));
//!
//! let v: Version = "8.2".parse().unwrap();
//! assert!(BEFORE_9.matches(&v));
//! assert!(!BEFORE_9.matches(&"9.0-update1".parse().unwrap()));
//! ```
//!
//! Versions are parsed into a structured, totally ordered value so that
//! `"10.0" > "9.0"` holds, which a plain string comparison gets wrong.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{input}': {reason}")]
pub struct VersionError {
    pub input: String,
    pub reason: String,
}

/// A package version, ordered as `major.minor.patch`.
///
/// Partial versions are padded (`"8"` is `8.0.0`, `"9.0"` is `9.0.0`) and
/// leading zeros are dropped (`"9.01"` is `9.1.0`). Components past the third
/// and a `-suffix` are kept as a tie-breaker that sorts after the bare
/// release, so `9.0.0.150 > 9.0` and `9.0-update1 > 9.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    parsed: semver::Version,
    /// Text as written; `None` for versions built with [`Version::new`].
    original: Option<String>,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            parsed: semver::Version::new(major, minor, patch),
            original: None,
        }
    }

    pub fn major(&self) -> u64 {
        self.parsed.major
    }

    pub fn minor(&self) -> u64 {
        self.parsed.minor
    }

    pub fn patch(&self) -> u64 {
        self.parsed.patch
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let original = s.trim().to_string();
        let error = |reason: String| VersionError {
            input: original.clone(),
            reason,
        };
        if original.is_empty() {
            return Err(error("empty version".to_string()));
        }

        let normalized = normalize(&original).map_err(&error)?;
        let parsed =
            semver::Version::parse(&normalized).map_err(|e| error(e.to_string()))?;

        Ok(Self {
            parsed,
            original: Some(original),
        })
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp(&other.parsed)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.original {
            Some(original) => f.write_str(original),
            None if self.parsed.patch == 0 => {
                write!(f, "{}.{}", self.parsed.major, self.parsed.minor)
            }
            None => write!(
                f,
                "{}.{}.{}",
                self.parsed.major, self.parsed.minor, self.parsed.patch
            ),
        }
    }
}

/// Rewrite a loose version (`v9.0`, `9.01`, `9.0.1.150`, `8.2-update1`) as
/// semver. Extra components and the suffix become build metadata.
fn normalize(version: &str) -> Result<String, String> {
    let version = version.trim_start_matches('v');
    let (core, suffix) = match version.split_once('-') {
        Some((core, suffix)) => (core, Some(suffix)),
        None => (version, None),
    };

    let mut numbers = core
        .split('.')
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| format!("'{}' is not a number", part))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let extra = numbers.split_off(numbers.len().min(3));
    numbers.resize(3, 0);

    let mut build: Vec<String> = extra.iter().map(u64::to_string).collect();
    if let Some(suffix) = suffix {
        build.extend(
            suffix
                .split(|c: char| !c.is_ascii_alphanumeric() && c != '-')
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        );
    }

    let mut out = format!("{}.{}.{}", numbers[0], numbers[1], numbers[2]);
    if !build.is_empty() {
        out.push('+');
        out.push_str(&build.join("."));
    }
    Ok(out)
}

/// Comparison operator of a [`VersionGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOp {
    Lt,
    Gt,
    Ge,
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateOp::Lt => "<",
            GateOp::Gt => ">",
            GateOp::Ge => ">=",
        };
        f.write_str(s)
    }
}

/// An ordered comparison of the package version against one threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    pub op: GateOp,
    pub threshold: Version,
}

impl VersionGate {
    pub const fn lt(threshold: Version) -> Self {
        Self {
            op: GateOp::Lt,
            threshold,
        }
    }

    pub const fn gt(threshold: Version) -> Self {
        Self {
            op: GateOp::Gt,
            threshold,
        }
    }

    pub const fn ge(threshold: Version) -> Self {
        Self {
            op: GateOp::Ge,
            threshold,
        }
    }

    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            GateOp::Lt => *version < self.threshold,
            GateOp::Gt => *version > self.threshold,
            GateOp::Ge => *version >= self.threshold,
        }
    }
}

impl fmt::Display for VersionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.threshold)
    }
}

/// Evaluate every gate in order and keep the value of the last one that matched.
///
/// Gates are not exclusive: several may match, and a later match replaces the
/// value chosen by an earlier one. Returns `None` when nothing matched.
pub fn select_layered<T: Clone>(version: &Version, gates: &[(VersionGate, T)]) -> Option<T> {
    let mut selected = None;
    for (gate, value) in gates {
        if gate.matches(version) {
            tracing::debug!(%version, %gate, "version gate matched");
            selected = Some(value.clone());
        }
    }
    selected
}
