//! Self-update core for the `site` server binary
//!
//! Provides:
//! - Version feed queries and timestamp-based version ordering
//! - Release archive download over HTTPS
//! - In-memory gzip/tar extraction of the single executable payload
//! - Platform-aware atomic-as-possible binary replacement
//! - An orchestrator that sequences one end-to-end update attempt and
//!   restarts a managed daemon so it picks up the new binary

pub mod archive;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod platform;
pub mod updater;
pub mod version;

pub use config::{ReleaseChannel, UpdateConfig};
pub use error::{Result, UpdateError};
pub use fetch::UpdateClient;
pub use install::{InstallStrategy, PosixInstall, WindowsInstall};
pub use platform::PlatformTarget;
pub use updater::{PrivilegeGate, ServiceManager, SiteUpdater, UpdateCheck, UpdateOutcome};
pub use version::{BuildInfo, VersionId};
