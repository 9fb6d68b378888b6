// SPDX-License-Identifier: GPL-3.0-only

//! In-memory machine implementing every collaborator contract
//!
//! Letter rules follow the platform: a letter is held by at most one volume,
//! assigning a letter replaces the volume's previous one, and removing an
//! access path the volume does not have is an error.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use driveletter_contracts::{
    PrivilegeProbe, VolumeDirectory, VolumeError, VolumeErrorKind, VolumeLetterMutator,
};
use driveletter_types::{DriveLetter, Volume, VolumeId};
use tracing::debug;

use crate::ledger::{Ledger, MachineCall};

#[derive(Debug)]
struct MachineState {
    volumes: Vec<Volume>,
    elevated: bool,
    ledger: Ledger,
    failing_assign: HashSet<(u32, u32)>,
    failing_unassign: HashSet<(u32, u32)>,
    failing_listings_from: Option<usize>,
    listings: usize,
}

#[derive(Debug)]
pub struct FakeMachine {
    state: Mutex<MachineState>,
}

impl FakeMachine {
    pub fn new(volumes: Vec<Volume>) -> Self {
        Self {
            state: Mutex::new(MachineState {
                volumes,
                elevated: true,
                ledger: Ledger::default(),
                failing_assign: HashSet::new(),
                failing_unassign: HashSet::new(),
                failing_listings_from: None,
                listings: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MachineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_elevated(&self, elevated: bool) {
        self.state().elevated = elevated;
    }

    /// Make every assign call on this partition fail.
    pub fn fail_assign_on(&self, disk: u32, partition: u32) {
        self.state().failing_assign.insert((disk, partition));
    }

    /// Make every unassign call on this partition fail.
    pub fn fail_unassign_on(&self, disk: u32, partition: u32) {
        self.state().failing_unassign.insert((disk, partition));
    }

    /// Enumerations with zero-based call index `>= index` fail.
    pub fn fail_listings_from(&self, index: usize) {
        self.state().failing_listings_from = Some(index);
    }

    pub fn volumes(&self) -> Vec<Volume> {
        self.state().volumes.clone()
    }

    pub fn volume_by_id(&self, id: &VolumeId) -> Option<Volume> {
        self.state()
            .volumes
            .iter()
            .find(|volume| volume.has_id(id))
            .cloned()
    }

    pub fn letter_of(&self, id: &VolumeId) -> Option<DriveLetter> {
        self.volume_by_id(id).and_then(|volume| volume.current_letter)
    }

    pub fn calls(&self) -> Vec<MachineCall> {
        self.state().ledger.calls().to_vec()
    }

    pub fn mutations(&self) -> Vec<MachineCall> {
        self.state().ledger.mutations()
    }

    pub fn listing_count(&self) -> usize {
        self.state().listings
    }
}

fn locate(volumes: &mut [Volume], disk: u32, partition: u32) -> Result<&mut Volume, VolumeError> {
    volumes
        .iter_mut()
        .find(|volume| volume.disk_index == disk && volume.partition_index == partition)
        .ok_or_else(|| {
            VolumeError::new(
                VolumeErrorKind::NotFound,
                format!("no partition {partition} on disk {disk}"),
            )
        })
}

impl VolumeDirectory for FakeMachine {
    fn list_volumes(&self) -> Result<Vec<Volume>, VolumeError> {
        let mut state = self.state();
        state.ledger.push(MachineCall::ListVolumes);

        let index = state.listings;
        state.listings += 1;

        if state
            .failing_listings_from
            .is_some_and(|from| index >= from)
        {
            return Err(VolumeError::new(
                VolumeErrorKind::Internal,
                format!("injected enumeration failure (call {index})"),
            ));
        }

        Ok(state.volumes.clone())
    }
}

impl VolumeLetterMutator for FakeMachine {
    fn assign_letter(
        &self,
        disk_index: u32,
        partition_index: u32,
        letter: DriveLetter,
    ) -> Result<(), VolumeError> {
        let mut state = self.state();
        state.ledger.push(MachineCall::AssignLetter {
            disk: disk_index,
            partition: partition_index,
            letter,
        });

        if !state.elevated {
            return Err(VolumeError::permission_denied("access denied"));
        }
        if state.failing_assign.contains(&(disk_index, partition_index)) {
            return Err(VolumeError::new(
                VolumeErrorKind::Internal,
                "injected assign failure",
            ));
        }

        let held_elsewhere = state.volumes.iter().any(|volume| {
            volume.holds(letter)
                && (volume.disk_index, volume.partition_index) != (disk_index, partition_index)
        });
        if held_elsewhere {
            return Err(VolumeError::new(
                VolumeErrorKind::Conflict,
                format!("the drive letter {letter} is already in use"),
            ));
        }

        let volume = locate(&mut state.volumes, disk_index, partition_index)?;
        volume.current_letter = Some(letter);
        debug!("fake: assigned {}: to {}", letter, volume.location());
        Ok(())
    }

    fn unassign_letter(
        &self,
        disk_index: u32,
        partition_index: u32,
        letter: DriveLetter,
    ) -> Result<(), VolumeError> {
        let mut state = self.state();
        state.ledger.push(MachineCall::UnassignLetter {
            disk: disk_index,
            partition: partition_index,
            letter,
        });

        if !state.elevated {
            return Err(VolumeError::permission_denied("access denied"));
        }
        if state
            .failing_unassign
            .contains(&(disk_index, partition_index))
        {
            return Err(VolumeError::new(
                VolumeErrorKind::Internal,
                "injected unassign failure",
            ));
        }

        let volume = locate(&mut state.volumes, disk_index, partition_index)?;
        if !volume.holds(letter) {
            return Err(VolumeError::new(
                VolumeErrorKind::InvalidInput,
                format!("access path {} not found", letter.access_path()),
            ));
        }
        volume.current_letter = None;
        debug!("fake: removed {}: from {}", letter, volume.location());
        Ok(())
    }
}

impl PrivilegeProbe for FakeMachine {
    fn is_elevated(&self) -> Result<bool, VolumeError> {
        let mut state = self.state();
        state.ledger.push(MachineCall::IsElevated);
        Ok(state.elevated)
    }
}
