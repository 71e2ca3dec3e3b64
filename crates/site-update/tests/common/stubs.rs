//! Stub collaborators for orchestrator tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use site_update::{PrivilegeGate, Result, ServiceManager, UpdateError};

/// Privilege gate that always passes
pub struct AllowGate;

impl PrivilegeGate for AllowGate {
    fn ensure_elevated(&self) -> Result<()> {
        Ok(())
    }
}

/// Privilege gate that always refuses
pub struct DenyGate;

impl PrivilegeGate for DenyGate {
    fn ensure_elevated(&self) -> Result<()> {
        Err(UpdateError::PrivilegeRequired)
    }
}

/// Service manager stub with scripted availability/activity and a restart
/// counter observable from the test
pub struct StubService {
    pub available: bool,
    pub active: bool,
    pub fail_restart: bool,
    restarts: Arc<AtomicUsize>,
}

impl StubService {
    pub fn new(available: bool, active: bool) -> (Self, Arc<AtomicUsize>) {
        let restarts = Arc::new(AtomicUsize::new(0));
        (
            Self {
                available,
                active,
                fail_restart: false,
                restarts: restarts.clone(),
            },
            restarts,
        )
    }

    pub fn failing_restart(available: bool, active: bool) -> (Self, Arc<AtomicUsize>) {
        let (mut stub, restarts) = Self::new(available, active);
        stub.fail_restart = true;
        (stub, restarts)
    }
}

impl ServiceManager for StubService {
    fn is_available(&self) -> bool {
        self.available
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn restart(&self) -> Result<()> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        if self.fail_restart {
            Err(UpdateError::DaemonRestart(
                "systemctl restart site exited with status 1".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
