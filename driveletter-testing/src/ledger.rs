// SPDX-License-Identifier: GPL-3.0-only

//! Record of every collaborator call a [`crate::FakeMachine`] received

use driveletter_types::DriveLetter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum MachineCall {
    IsElevated,
    ListVolumes,
    AssignLetter {
        disk: u32,
        partition: u32,
        letter: DriveLetter,
    },
    UnassignLetter {
        disk: u32,
        partition: u32,
        letter: DriveLetter,
    },
}

impl MachineCall {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::AssignLetter { .. } | Self::UnassignLetter { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    calls: Vec<MachineCall>,
}

impl Ledger {
    pub fn push(&mut self, call: MachineCall) {
        self.calls.push(call);
    }

    pub fn calls(&self) -> &[MachineCall] {
        &self.calls
    }

    pub fn mutations(&self) -> Vec<MachineCall> {
        self.calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }
}
