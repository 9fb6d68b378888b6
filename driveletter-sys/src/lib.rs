// SPDX-License-Identifier: GPL-3.0-only

//! Platform backend for driveletter
//!
//! Volume enumeration and letter changes go through the Windows storage
//! cmdlets (`Get-Partition`, `Set-Partition`, `Remove-PartitionAccessPath`)
//! run by a non-interactive PowerShell process:
//! - enumeration output is requested as JSON and parsed here
//! - mutations and the elevation probe are single-command scripts
//!
//! These operations require an elevated (administrator) process.

pub mod backend;
pub mod error;
pub mod partitions;
pub mod powershell;

pub use backend::PowerShellVolumes;
pub use error::{Result, SysError};
pub use powershell::PowerShell;
