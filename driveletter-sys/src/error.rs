// SPDX-License-Identifier: GPL-3.0-only

use driveletter_contracts::{VolumeError, VolumeErrorKind};
use thiserror::Error;

/// Error types for system-level operations
#[derive(Error, Debug)]
pub enum SysError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("PowerShell not found in PATH (tried pwsh, powershell)")]
    PowerShellNotFound,

    #[error("Command failed: {command}: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Unexpected cmdlet output: {0}")]
    Parse(String),
}

impl From<SysError> for VolumeError {
    fn from(err: SysError) -> Self {
        let kind = match &err {
            SysError::PermissionDenied(_) => VolumeErrorKind::PermissionDenied,
            SysError::PowerShellNotFound => VolumeErrorKind::Unavailable,
            SysError::Parse(_) => VolumeErrorKind::Internal,
            SysError::Io(_) | SysError::CommandFailed { .. } => VolumeErrorKind::Internal,
        };
        VolumeError::new(kind, err.to_string())
    }
}

/// Result type alias for system operations
pub type Result<T> = std::result::Result<T, SysError>;
