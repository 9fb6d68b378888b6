// SPDX-License-Identifier: GPL-3.0-only

//! Dry-run bookkeeping
//!
//! A dry run executes nothing, so later entries would otherwise plan against
//! a machine that never changed. The overlay replays every previewed action
//! on top of each fresh enumeration so the reported plan matches a real run.

use driveletter_types::{LetterAction, Volume};

#[derive(Debug, Clone, Default)]
pub struct PreviewOverlay {
    actions: Vec<LetterAction>,
}

impl PreviewOverlay {
    pub fn record(&mut self, action: &LetterAction) {
        self.actions.push(action.clone());
    }

    /// Apply every recorded action, in order, to a fresh enumeration.
    ///
    /// Volumes are matched by disk and partition index, which are stable for
    /// the duration of one run.
    pub fn apply(&self, mut volumes: Vec<Volume>) -> Vec<Volume> {
        for action in &self.actions {
            let handle = action.volume();
            let Some(volume) = volumes.iter_mut().find(|volume| {
                volume.disk_index == handle.disk_index
                    && volume.partition_index == handle.partition_index
            }) else {
                continue;
            };

            match action {
                LetterAction::Unassign { letter, .. } => {
                    if volume.holds(*letter) {
                        volume.current_letter = None;
                    }
                }
                LetterAction::Assign { letter, .. } => {
                    volume.current_letter = Some(*letter);
                }
            }
        }
        volumes
    }
}
