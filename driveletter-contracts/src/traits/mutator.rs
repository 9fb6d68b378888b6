// SPDX-License-Identifier: GPL-3.0-only

use driveletter_types::DriveLetter;

use crate::VolumeError;

/// Changes the drive letter access path of a partition.
///
/// Both calls are privileged and block until the platform reports a result.
pub trait VolumeLetterMutator: Send + Sync {
    fn assign_letter(
        &self,
        disk_index: u32,
        partition_index: u32,
        letter: DriveLetter,
    ) -> Result<(), VolumeError>;

    fn unassign_letter(
        &self,
        disk_index: u32,
        partition_index: u32,
        letter: DriveLetter,
    ) -> Result<(), VolumeError>;
}

impl<T: VolumeLetterMutator + ?Sized> VolumeLetterMutator for &T {
    fn assign_letter(
        &self,
        disk_index: u32,
        partition_index: u32,
        letter: DriveLetter,
    ) -> Result<(), VolumeError> {
        (**self).assign_letter(disk_index, partition_index, letter)
    }

    fn unassign_letter(
        &self,
        disk_index: u32,
        partition_index: u32,
        letter: DriveLetter,
    ) -> Result<(), VolumeError> {
        (**self).unassign_letter(disk_index, partition_index, letter)
    }
}
