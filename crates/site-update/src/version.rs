//! Version identifiers and comparison
//!
//! Releases are identified by timestamp-like tokens (e.g. `20230101120000`)
//! rather than semver. The tokens are opaque but totally ordered: numeric
//! when both sides are all digits, lexical otherwise.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque, totally ordered release identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    /// Wrap a raw identifier, trimming surrounding whitespace
    ///
    /// The version feed is plain text and usually ends with a newline.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u128> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

impl Ord for VersionId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for VersionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Version metadata embedded into the running binary at build time
///
/// Two independent identifiers exist per installation: the binary version
/// (which drives the update decision) and the source version (displayed in
/// the update summary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Version of the installed binary artifact
    pub binary_version: VersionId,

    /// Version of the source tree the binary was built from
    pub source_version: VersionId,
}

impl BuildInfo {
    /// Build info for the current build, from metadata emitted by build.rs
    pub fn current() -> Self {
        Self {
            binary_version: VersionId::new(env!("SITE_BINARY_VERSION")),
            source_version: VersionId::new(env!("SITE_SOURCE_VERSION")),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "site {} (source {})",
            self.binary_version, self.source_version
        )
    }
}
