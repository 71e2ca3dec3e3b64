//! Update command
//!
//! Wires the update core to the host: root privilege gate, systemd service
//! manager, and the well-known install path for this platform.

use anyhow::Result;
use site_update::{SiteUpdater, UpdateCheck, UpdateConfig, UpdateOutcome};

use crate::cli::UpdateArgs;
use crate::output;
use crate::system::{RootPrivilegeGate, SystemdServiceManager};

pub async fn run(args: UpdateArgs) -> i32 {
    match execute(args).await {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            1
        }
    }
}

async fn execute(args: UpdateArgs) -> Result<i32> {
    let mut config = match &args.config {
        Some(path) => UpdateConfig::load_from(path)?,
        None => UpdateConfig::load()?,
    };
    if let Some(channel) = args.channel {
        config = config.with_channel(channel);
    }
    if let Some(url) = args.url {
        config = config.with_base_url(url);
    }

    let updater = SiteUpdater::new(
        config,
        Box::new(RootPrivilegeGate),
        Box::new(SystemdServiceManager::new()),
    )?;

    if args.check {
        return check(&updater).await;
    }

    output::info(&format!("Current version: {}", updater.current_version()));

    match updater.run().await {
        Ok(outcome) => {
            report(&outcome);
            Ok(outcome.exit_code())
        }
        Err(e) => {
            output::error(&e.to_string());
            Ok(e.exit_code())
        }
    }
}

/// Query-only dry run; requires no privileges and touches nothing on disk
async fn check(updater: &SiteUpdater) -> Result<i32> {
    let spinner = output::spinner("Checking for updates...");
    let result = updater.check().await;
    spinner.finish_and_clear();

    match result? {
        UpdateCheck::AlreadyLatest { current } => {
            output::success(&format!("Already on the latest version ({})", current));
        }
        UpdateCheck::NewerThanLatest { current, latest } => {
            output::info(&format!(
                "Running {} which is newer than the published {}",
                current, latest
            ));
        }
        UpdateCheck::Available { current, latest } => {
            output::success(&format!("Update available: {} -> {}", current, latest));
            output::info("Run 'site update' to install it");
        }
    }

    Ok(0)
}

fn report(outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::AlreadyLatest { version } => {
            output::success(&format!("Already on the latest version ({})", version));
        }
        UpdateOutcome::NewerThanLatest { current, latest } => {
            output::info(&format!(
                "Running {} which is newer than the published {}; nothing to do",
                current, latest
            ));
        }
        UpdateOutcome::Updated {
            from,
            to,
            source,
            daemon_restarted,
        } => {
            output::success(&format!("Updated to version {}", to));
            output::kv("Binary", &format!("{} -> {}", from, to));
            output::kv("Source", source.as_str());
            if *daemon_restarted {
                output::info("Managed daemon restarted with the new binary");
            }
        }
    }
}
