//! Semantic version identifiers for migration files and records.
//!
//! Accepts the strict `MAJOR.MINOR.PATCH` and `MAJOR.MINOR.PATCH-PRERELEASE`
//! forms. Ordering compares the numeric triple first; the prerelease label
//! only breaks ties, and a prerelease sorts before its release.

use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed `MAJOR.MINOR.PATCH[-PRERELEASE]` version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Empty when the version is a release.
    pub prerelease: String,
}

impl Version {
    /// Build a release version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: String::new(),
        }
    }

    /// Parse a version string.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidVersion {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (core, prerelease) = match input.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (input, None),
        };

        let fields: Vec<&str> = core.split('.').collect();
        if fields.len() != 3 {
            return Err(invalid("expected MAJOR.MINOR.PATCH"));
        }
        let major = parse_numeric(fields[0]).ok_or_else(|| invalid("major is not a number"))?;
        let minor = parse_numeric(fields[1]).ok_or_else(|| invalid("minor is not a number"))?;
        let patch = parse_numeric(fields[2]).ok_or_else(|| invalid("patch is not a number"))?;

        let prerelease = match prerelease {
            Some(pre) => {
                if pre.is_empty() || pre.split('.').any(|ident| !is_valid_identifier(ident)) {
                    return Err(invalid("malformed prerelease"));
                }
                pre.to_string()
            }
            None => String::new(),
        };

        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
        })
    }

    /// Whether this version carries a prerelease label.
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// The numeric `(major, minor, patch)` triple.
    pub fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

/// Digits only; no sign, no whitespace.
fn parse_numeric(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn is_valid_identifier(ident: &str) -> bool {
    !ident.is_empty()
        && ident
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Semver precedence for a single dot-separated prerelease identifier:
/// numeric identifiers compare numerically and sort below alphanumeric ones.
fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (parse_numeric(a), parse_numeric(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn compare_prerelease(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let mut left = a.split('.');
            let mut right = b.split('.');
            loop {
                match (left.next(), right.next()) {
                    (Some(x), Some(y)) => match compare_identifier(x, y) {
                        Ordering::Equal => continue,
                        other => return other,
                    },
                    (Some(_), None) => return Ordering::Greater,
                    (None, Some(_)) => return Ordering::Less,
                    (None, None) => return Ordering::Equal,
                }
            }
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| compare_prerelease(&self.prerelease, &other.prerelease))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.is_prerelease() {
            write!(f, "-{}", self.prerelease)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
