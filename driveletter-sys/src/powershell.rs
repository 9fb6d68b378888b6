// SPDX-License-Identifier: GPL-3.0-only

//! Non-interactive PowerShell runner

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info, warn};
use which::which;

use crate::error::{Result, SysError};

const CANDIDATES: [&str; 2] = ["pwsh", "powershell"];

/// Markers PowerShell uses when a cmdlet is refused for lack of rights
const ACCESS_DENIED_MARKERS: [&str; 3] =
    ["Access denied", "Access is denied", "PermissionDenied"];

/// PowerShell wrapper for running storage cmdlets
#[derive(Debug, Clone)]
pub struct PowerShell {
    /// Path to the PowerShell binary
    binary_path: PathBuf,
}

impl PowerShell {
    /// Locate PowerShell in PATH, preferring PowerShell 7 (`pwsh`).
    pub fn new() -> Result<Self> {
        let binary_path = Self::find_binary()?;
        info!("Found PowerShell at {:?}", binary_path);
        Ok(Self { binary_path })
    }

    pub fn find_binary() -> Result<PathBuf> {
        CANDIDATES
            .iter()
            .find_map(|name| which(name).ok())
            .ok_or(SysError::PowerShellNotFound)
    }

    /// Full argument list for one script
    pub fn args(script: &str) -> Vec<String> {
        vec![
            "-NoProfile".to_string(),
            "-NonInteractive".to_string(),
            "-Command".to_string(),
            format!("$ErrorActionPreference = 'Stop'; {script}"),
        ]
    }

    /// Run a script and return its stdout.
    pub fn run(&self, script: &str) -> Result<String> {
        debug!("powershell: {}", script);

        let output = Command::new(&self.binary_path)
            .args(Self::args(script))
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("PowerShell command failed: {}", stderr);
            return Err(classify_failure(script, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

pub fn classify_failure(script: &str, stderr: String) -> SysError {
    if ACCESS_DENIED_MARKERS
        .iter()
        .any(|marker| stderr.contains(marker))
    {
        SysError::PermissionDenied(stderr)
    } else {
        SysError::CommandFailed {
            command: script.to_string(),
            stderr,
        }
    }
}
