// SPDX-License-Identifier: GPL-3.0-only

use driveletter_contracts::PrivilegeProbe;
use tracing::{debug, error};

use crate::{Result, RunError};

/// Fail unless the process may enumerate and change volumes.
pub fn ensure_elevated(probe: &dyn PrivilegeProbe) -> Result<()> {
    match probe.is_elevated() {
        Ok(true) => {
            debug!("Privilege check passed");
            Ok(())
        }
        Ok(false) => {
            error!("Administrator rights are required");
            Err(RunError::Permission(
                "administrator rights are required; re-run from an elevated prompt".to_string(),
            ))
        }
        Err(e) => {
            error!("Privilege check failed: {}", e);
            Err(RunError::Permission(format!(
                "could not determine privilege level: {}",
                e.message
            )))
        }
    }
}
