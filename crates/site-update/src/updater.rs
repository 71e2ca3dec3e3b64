//! End-to-end update orchestration
//!
//! `SiteUpdater` drives one update attempt: privilege gate, version query,
//! decision, source-version query, download, platform-aware binary swap,
//! and a restart of the managed daemon when one was active beforehand.
//! Every step is awaited to completion before the next begins; nothing is
//! retried and every error is terminal for the run.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::archive;
use crate::config::{ReleaseChannel, UpdateConfig};
use crate::error::Result;
use crate::fetch::UpdateClient;
use crate::install::{strategy_for_host, InstallStrategy};
use crate::platform::{OsFamily, PlatformTarget};
use crate::version::{BuildInfo, VersionId};

/// Privilege precondition checked before any network activity
pub trait PrivilegeGate {
    /// Fail with `PrivilegeRequired` unless running with elevated rights
    fn ensure_elevated(&self) -> Result<()>;
}

/// Interface to the host's service manager for the managed daemon
pub trait ServiceManager {
    /// Whether a service-management tool exists on this host
    fn is_available(&self) -> bool;

    /// Whether a managed instance of the daemon is currently active
    fn is_active(&self) -> bool;

    /// Restart the managed instance so it runs the new binary
    fn restart(&self) -> Result<()>;
}

/// Version feed URL for a channel
pub fn version_feed_url(base_url: &str, channel: ReleaseChannel) -> String {
    format!("{}/version/{}", base_url.trim_end_matches('/'), channel)
}

/// Unscoped source-version feed URL
pub fn source_version_url(base_url: &str) -> String {
    format!("{}/version/", base_url.trim_end_matches('/'))
}

/// Download URL for a release archive
pub fn archive_url(
    base_url: &str,
    channel: ReleaseChannel,
    platform: &PlatformTarget,
    version: &VersionId,
) -> String {
    format!(
        "{}/binaries/{}/{}/{}.tar.gz",
        base_url.trim_end_matches('/'),
        channel,
        platform.path_segment(),
        version
    )
}

/// Terminal non-error states of an update attempt; all exit 0
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Installed binary already matches the latest published version
    AlreadyLatest { version: VersionId },

    /// Installed binary is newer than the latest published version
    /// (pre-release build); never downgraded
    NewerThanLatest {
        current: VersionId,
        latest: VersionId,
    },

    /// Binary was replaced on disk
    Updated {
        from: VersionId,
        to: VersionId,
        source: VersionId,
        daemon_restarted: bool,
    },
}

impl UpdateOutcome {
    pub fn exit_code(&self) -> i32 {
        0
    }
}

/// Result of a query-only check, with no side effects
#[derive(Debug)]
pub enum UpdateCheck {
    AlreadyLatest {
        current: VersionId,
    },
    NewerThanLatest {
        current: VersionId,
        latest: VersionId,
    },
    Available {
        current: VersionId,
        latest: VersionId,
    },
}

/// Orchestrator for one self-update attempt
pub struct SiteUpdater {
    config: UpdateConfig,
    client: UpdateClient,
    build: BuildInfo,
    platform: PlatformTarget,
    strategy: Box<dyn InstallStrategy>,
    gate: Box<dyn PrivilegeGate>,
    service: Box<dyn ServiceManager>,
}

impl SiteUpdater {
    /// Create an updater for the running host
    pub fn new(
        config: UpdateConfig,
        gate: Box<dyn PrivilegeGate>,
        service: Box<dyn ServiceManager>,
    ) -> Result<Self> {
        Ok(Self {
            config,
            client: UpdateClient::new()?,
            build: BuildInfo::current(),
            platform: PlatformTarget::current()?,
            strategy: strategy_for_host(),
            gate,
            service,
        })
    }

    /// Substitute the HTTP client (tests)
    pub fn with_client(mut self, client: UpdateClient) -> Self {
        self.client = client;
        self
    }

    /// Substitute the embedded build metadata (tests)
    pub fn with_build_info(mut self, build: BuildInfo) -> Self {
        self.build = build;
        self
    }

    /// Substitute the platform target (tests)
    pub fn with_platform(mut self, platform: PlatformTarget) -> Self {
        self.platform = platform;
        self
    }

    /// Substitute the install strategy (tests, or explicit paths)
    pub fn with_strategy(mut self, strategy: Box<dyn InstallStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Version of the currently installed binary
    pub fn current_version(&self) -> &VersionId {
        &self.build.binary_version
    }

    /// Query the channel feed for the latest published binary version
    async fn query_latest(&self) -> Result<VersionId> {
        let url = version_feed_url(&self.config.base_url, self.config.channel);
        let response = self.client.fetch_text(&url).await?;
        Ok(VersionId::new(response.body))
    }

    /// Check whether an update is available, without touching the disk
    pub async fn check(&self) -> Result<UpdateCheck> {
        let latest = self.query_latest().await?;
        let current = self.build.binary_version.clone();

        Ok(match current.cmp(&latest) {
            Ordering::Equal => UpdateCheck::AlreadyLatest { current },
            Ordering::Greater => UpdateCheck::NewerThanLatest { current, latest },
            Ordering::Less => UpdateCheck::Available { current, latest },
        })
    }

    /// Run one end-to-end update attempt
    pub async fn run(&self) -> Result<UpdateOutcome> {
        self.gate.ensure_elevated()?;

        info!(
            "checking {} channel for updates (current version {})",
            self.config.channel, self.build.binary_version
        );

        let latest = self.query_latest().await?;
        let current = self.build.binary_version.clone();

        match current.cmp(&latest) {
            Ordering::Equal => {
                info!("already running the latest version {}", current);
                return Ok(UpdateOutcome::AlreadyLatest { version: current });
            }
            Ordering::Greater => {
                info!(
                    "running {} which is newer than published {}; not downgrading",
                    current, latest
                );
                return Ok(UpdateOutcome::NewerThanLatest { current, latest });
            }
            Ordering::Less => {
                info!("update available: {} -> {}", current, latest);
            }
        }

        // Fetched only for the user-facing summary, but a failure here still
        // aborts the run before anything touches the disk.
        let source_url = source_version_url(&self.config.base_url);
        let source = VersionId::new(self.client.fetch_text(&source_url).await?.body);
        debug!("latest source version: {}", source);

        let url = archive_url(&self.config.base_url, self.config.channel, &self.platform, &latest);
        info!("downloading {}", url);
        let archive_bytes = self.client.fetch_binary(&url).await?;

        // Sample daemon state before the swap so the restart decision
        // reflects what was running under the old binary.
        let restart_wanted = self.platform.os != OsFamily::Windows
            && self.service.is_available()
            && self.service.is_active();
        debug!("daemon restart wanted: {}", restart_wanted);

        // Past this point the old binary is gone from the canonical path;
        // an extraction or write failure leaves the host without one.
        self.strategy.prepare()?;
        let executable = archive::extract(&archive_bytes)?;
        self.strategy.write(&executable)?;

        // The swap is complete; a restart failure is reported but never
        // rolled back.
        let daemon_restarted = if restart_wanted {
            info!("restarting managed daemon");
            self.service.restart()?;
            true
        } else {
            false
        };

        info!("updated {} -> {}", current, latest);
        Ok(UpdateOutcome::Updated {
            from: current,
            to: latest,
            source,
            daemon_restarted,
        })
    }
}
