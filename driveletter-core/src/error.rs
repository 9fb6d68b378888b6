// SPDX-License-Identifier: GPL-3.0-only

use driveletter_contracts::VolumeError;
use thiserror::Error;

/// Process-level failures. Anything per entry lands in the report instead.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("insufficient privilege: {0}")]
    Permission(String),

    #[error("volume enumeration failed: {0}")]
    Enumeration(#[source] VolumeError),
}

impl RunError {
    /// Classify a failed enumeration, keeping privilege problems distinct.
    pub fn from_enumeration(error: VolumeError) -> Self {
        if error.is_permission_denied() {
            Self::Permission(error.message)
        } else {
            Self::Enumeration(error)
        }
    }
}

pub type Result<T> = std::result::Result<T, RunError>;
