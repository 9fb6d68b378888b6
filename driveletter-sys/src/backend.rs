// SPDX-License-Identifier: GPL-3.0-only

use driveletter_contracts::{PrivilegeProbe, VolumeDirectory, VolumeError, VolumeLetterMutator};
use driveletter_types::{DriveLetter, Volume};
use tracing::{debug, info};

use crate::error::Result;
use crate::partitions::{
    ELEVATION_SCRIPT, LIST_SCRIPT, assign_script, parse_elevation, parse_partitions,
    unassign_script,
};
use crate::powershell::PowerShell;

/// Volume directory, letter mutator and elevation probe backed by the
/// Windows storage cmdlets
#[derive(Debug, Clone)]
pub struct PowerShellVolumes {
    shell: PowerShell,
}

impl PowerShellVolumes {
    pub fn new() -> Result<Self> {
        Ok(Self {
            shell: PowerShell::new()?,
        })
    }

    fn list(&self) -> Result<Vec<Volume>> {
        let stdout = self.shell.run(LIST_SCRIPT)?;
        let volumes = parse_partitions(&stdout)?;
        debug!("Get-Partition returned {} partitions", volumes.len());
        Ok(volumes)
    }
}

impl VolumeDirectory for PowerShellVolumes {
    fn list_volumes(&self) -> std::result::Result<Vec<Volume>, VolumeError> {
        Ok(self.list()?)
    }
}

impl VolumeLetterMutator for PowerShellVolumes {
    fn assign_letter(
        &self,
        disk_index: u32,
        partition_index: u32,
        letter: DriveLetter,
    ) -> std::result::Result<(), VolumeError> {
        self.shell
            .run(&assign_script(disk_index, partition_index, letter))?;
        info!(
            "Assigned {}: to disk {} partition {}",
            letter, disk_index, partition_index
        );
        Ok(())
    }

    fn unassign_letter(
        &self,
        disk_index: u32,
        partition_index: u32,
        letter: DriveLetter,
    ) -> std::result::Result<(), VolumeError> {
        self.shell
            .run(&unassign_script(disk_index, partition_index, letter))?;
        info!(
            "Removed {}: from disk {} partition {}",
            letter, disk_index, partition_index
        );
        Ok(())
    }
}

impl PrivilegeProbe for PowerShellVolumes {
    fn is_elevated(&self) -> std::result::Result<bool, VolumeError> {
        let stdout = self.shell.run(ELEVATION_SCRIPT)?;
        Ok(parse_elevation(&stdout)?)
    }
}
