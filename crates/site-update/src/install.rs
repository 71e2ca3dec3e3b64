//! Platform-aware replacement of the installed binary
//!
//! POSIX allows unlinking the backing file of a running process, so the
//! live binary is removed and rewritten in place. Windows keeps the live
//! file locked, so it is renamed aside to a fixed backup path instead; the
//! previous backup, if any, is pruned first so at most one generation ever
//! exists.
//!
//! There is no retry and no rollback here: a write failure after the old
//! binary has been unlinked or renamed leaves the canonical path empty.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, UpdateError};

/// Well-known installation path on POSIX systems
pub const POSIX_INSTALL_PATH: &str = "/usr/local/bin/site";

/// Well-known installation path on Windows
pub const WINDOWS_INSTALL_PATH: &str = r"C:\Program Files\site\site.exe";

/// Fixed backup path used while the live file is locked on Windows
pub const WINDOWS_BACKUP_PATH: &str = r"C:\Program Files\site\site.old.exe";

/// Platform policy for swapping the installed executable
///
/// `prepare` frees the installation path before the new payload exists on
/// disk; `write` lays down the new executable. The orchestrator calls them
/// separately so extraction failures between the two are observable;
/// `install` composes both for standalone use.
pub trait InstallStrategy {
    /// Canonical path of the installed executable
    fn target_path(&self) -> &Path;

    /// Free the installation path (unlink or rename-to-backup)
    fn prepare(&self) -> Result<()>;

    /// Write the new executable at the installation path
    fn write(&self, executable: &[u8]) -> Result<()>;

    /// Full replacement: prepare then write
    fn install(&self, executable: &[u8]) -> Result<()> {
        self.prepare()?;
        self.write(executable)
    }
}

/// Select the strategy for the running host
pub fn strategy_for_host() -> Box<dyn InstallStrategy> {
    if cfg!(windows) {
        Box::new(WindowsInstall::default())
    } else {
        Box::new(PosixInstall::default())
    }
}

/// Unlink-then-write replacement
///
/// Removing the directory entry does not disturb the running process; its
/// inode stays alive until the last file handle drops.
pub struct PosixInstall {
    target: PathBuf,
}

impl PosixInstall {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Default for PosixInstall {
    fn default() -> Self {
        Self::new(POSIX_INSTALL_PATH)
    }
}

impl InstallStrategy for PosixInstall {
    fn target_path(&self) -> &Path {
        &self.target
    }

    fn prepare(&self) -> Result<()> {
        match fs::remove_file(&self.target) {
            Ok(()) => {
                debug!("unlinked {}", self.target.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(UpdateError::fs("unlink", &self.target, e)),
        }
    }

    fn write(&self, executable: &[u8]) -> Result<()> {
        fs::write(&self.target, executable)
            .map_err(|e| UpdateError::fs("write", &self.target, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.target, fs::Permissions::from_mode(0o755))
                .map_err(|e| UpdateError::fs("chmod", &self.target, e))?;
        }

        info!(
            "installed {} ({} bytes)",
            self.target.display(),
            executable.len()
        );
        Ok(())
    }
}

/// Backup-rename-then-write replacement for hosts that lock the live file
pub struct WindowsInstall {
    target: PathBuf,
    backup: PathBuf,
}

impl WindowsInstall {
    pub fn new(target: impl Into<PathBuf>, backup: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            backup: backup.into(),
        }
    }
}

impl Default for WindowsInstall {
    fn default() -> Self {
        Self::new(WINDOWS_INSTALL_PATH, WINDOWS_BACKUP_PATH)
    }
}

impl InstallStrategy for WindowsInstall {
    fn target_path(&self) -> &Path {
        &self.target
    }

    fn prepare(&self) -> Result<()> {
        // Prune the backup left by the previous update, if any.
        if self.backup.exists() {
            fs::remove_file(&self.backup)
                .map_err(|e| UpdateError::fs("remove stale backup", &self.backup, e))?;
            debug!("removed stale backup {}", self.backup.display());
        }

        if self.target.exists() {
            fs::rename(&self.target, &self.backup)
                .map_err(|e| UpdateError::fs("rename to backup", &self.target, e))?;
            debug!(
                "moved {} -> {}",
                self.target.display(),
                self.backup.display()
            );
        }

        Ok(())
    }

    fn write(&self, executable: &[u8]) -> Result<()> {
        fs::write(&self.target, executable)
            .map_err(|e| UpdateError::fs("write", &self.target, e))?;

        info!(
            "installed {} ({} bytes)",
            self.target.display(),
            executable.len()
        );
        Ok(())
    }
}
