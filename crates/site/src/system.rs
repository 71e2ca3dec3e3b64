//! Host collaborators: privilege gate and systemd service manager

use std::process::Command;

use site_update::{PrivilegeGate, Result, ServiceManager, UpdateError};
use tracing::debug;

/// Name of the managed daemon's systemd unit
const SERVICE_NAME: &str = "site";

/// Privilege gate requiring an effective uid of 0
pub struct RootPrivilegeGate;

impl PrivilegeGate for RootPrivilegeGate {
    fn ensure_elevated(&self) -> Result<()> {
        #[cfg(unix)]
        {
            let euid = Command::new("id")
                .arg("-u")
                .output()
                .ok()
                .and_then(|out| String::from_utf8(out.stdout).ok())
                .and_then(|s| s.trim().parse::<u32>().ok());

            match euid {
                Some(0) => Ok(()),
                _ => Err(UpdateError::PrivilegeRequired),
            }
        }

        // The Windows build is launched from an already-elevated installer
        // console; there is no separate euid to probe.
        #[cfg(not(unix))]
        {
            Ok(())
        }
    }
}

/// Service manager backed by systemctl
pub struct SystemdServiceManager {
    service: String,
}

impl SystemdServiceManager {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }
}

impl Default for SystemdServiceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceManager for SystemdServiceManager {
    fn is_available(&self) -> bool {
        which::which("systemctl").is_ok()
    }

    fn is_active(&self) -> bool {
        Command::new("systemctl")
            .args(["is-active", "--quiet", &self.service])
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn restart(&self) -> Result<()> {
        debug!("systemctl restart {}", self.service);

        let output = Command::new("systemctl")
            .args(["restart", &self.service])
            .output()
            .map_err(|e| UpdateError::DaemonRestart(e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(UpdateError::DaemonRestart(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}
