// SPDX-License-Identifier: GPL-3.0-only

#![allow(dead_code)]

use std::collections::VecDeque;

use driveletter_core::RestoreHooks;
use driveletter_testing::FakeMachine;
use driveletter_types::{DriveLetter, EntryReport, LetterAction, Volume, VolumeId};

pub const ID_V1: &str = "11111111-1111-4111-8111-111111111111";
pub const ID_V2: &str = "22222222-2222-4222-8222-222222222222";
pub const ID_V3: &str = "33333333-3333-4333-8333-333333333333";
pub const ID_MISSING: &str = "99999999-9999-4999-8999-999999999999";

pub fn letter(value: char) -> DriveLetter {
    DriveLetter::new(value).unwrap()
}

pub fn id(raw: &str) -> VolumeId {
    raw.parse().unwrap()
}

pub fn volume(current: Option<char>, raw_id: Option<&str>, disk: u32, partition: u32) -> Volume {
    Volume {
        durable_id: raw_id.map(id),
        current_letter: current.map(letter),
        disk_index: disk,
        partition_index: partition,
    }
}

/// V1 at F:, V2 holding E:
pub fn swap_machine() -> FakeMachine {
    FakeMachine::new(vec![
        volume(Some('F'), Some(ID_V1), 1, 1),
        volume(Some('E'), Some(ID_V2), 1, 2),
    ])
}

/// Hooks answering confirmations from a script and keeping every status line
#[derive(Debug, Default)]
pub struct Scripted {
    pub answers: VecDeque<bool>,
    pub asked: Vec<LetterAction>,
    pub lines: Vec<String>,
}

impl Scripted {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl RestoreHooks for Scripted {
    fn confirm(&mut self, action: &LetterAction) -> bool {
        self.asked.push(action.clone());
        self.answers.pop_front().unwrap_or(true)
    }

    fn entry_finished(&mut self, report: &EntryReport) {
        self.lines.push(report.status_line());
    }
}
