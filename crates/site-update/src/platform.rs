//! Platform detection and release path mapping
//!
//! The release host lays binaries out by `{os, arch}` path segment. The
//! target is recomputed on every run from the host, never persisted.

use crate::error::{Result, UpdateError};

/// Name of the executable entry inside a release archive, and of the
/// installed binary itself
#[cfg(not(windows))]
pub const EXECUTABLE_NAME: &str = "site";
#[cfg(windows)]
pub const EXECUTABLE_NAME: &str = "site.exe";

/// Operating system families with published binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    MacOs,
    Windows,
}

/// CPU architectures distinguished by the release layout
///
/// Only linux+arm gets its own artifact; everything else shares the
/// per-OS default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm,
}

/// A resolved `{os, arch}` pair mapped to a release path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTarget {
    pub os: OsFamily,
    pub arch: Arch,
}

impl PlatformTarget {
    pub fn new(os: OsFamily, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Detect the target for the running host
    pub fn current() -> Result<Self> {
        let os = match std::env::consts::OS {
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::MacOs,
            "windows" => OsFamily::Windows,
            other => {
                return Err(UpdateError::UnsupportedPlatform {
                    os: other.to_string(),
                    arch: std::env::consts::ARCH.to_string(),
                })
            }
        };

        let arch = match std::env::consts::ARCH {
            "arm" | "aarch64" => Arch::Arm,
            _ => Arch::X64,
        };

        Ok(Self { os, arch })
    }

    /// URL path segment selecting the binary artifact for this target
    pub fn path_segment(&self) -> String {
        let base = match self.os {
            OsFamily::Linux => "linux",
            OsFamily::MacOs => "macos",
            OsFamily::Windows => "windows",
        };

        // The linux/arm combination is the only one with its own artifact.
        if self.os == OsFamily::Linux && self.arch == Arch::Arm {
            format!("{}-arm", base)
        } else {
            base.to_string()
        }
    }
}
