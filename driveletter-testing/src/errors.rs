// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestingError {
    #[error("lab not found for '{lab_name}' in resources/volume-labs")]
    LabNotFound { lab_name: String },
    #[error("invalid lab '{lab_name}': {reason}")]
    LabInvalid { lab_name: String, reason: String },
    #[error("mapping io error for {path:?}: {reason}")]
    MappingIo { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, TestingError>;
