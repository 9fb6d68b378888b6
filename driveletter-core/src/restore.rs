// SPDX-License-Identifier: GPL-3.0-only

//! Mapping restore
//!
//! Entries are processed strictly in mapping order. Each entry starts from a
//! fresh enumeration because earlier entries may have moved letters around;
//! no snapshot is ever reused once a mutation may have happened.
//!
//! Per entry:
//! 1. find the volume with the entry's identifier (`NotFound` otherwise)
//! 2. stop if it already holds the letter (`AlreadyCorrect`)
//! 3. remove the letter from whichever volume holds it
//!    (`ConflictUnassignFailed` aborts the entry)
//! 4. assign the letter (`Assigned` / `AssignFailed`)
//!
//! A failure only ends its own entry; the run always moves on.

use driveletter_contracts::{PrivilegeProbe, VolumeDirectory, VolumeError, VolumeLetterMutator};
use driveletter_types::{
    ActionRecord, ActionStatus, EntryOutcome, EntryReport, LetterAction, Mapping, MappingEntry,
    RestoreReport, Volume,
};
use tracing::{debug, error, info, warn};

use crate::preflight::ensure_elevated;
use crate::preview::PreviewOverlay;
use crate::{Result, RunError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreOptions {
    /// Record actions as if they succeeded without executing them
    pub dry_run: bool,
    /// Ask [`RestoreHooks::confirm`] before every mutation
    pub confirm_each: bool,
}

/// Operator-facing callbacks threaded through the entry loop
pub trait RestoreHooks {
    /// Called immediately before a mutation when `confirm_each` is set.
    /// Returning `false` skips that mutation.
    fn confirm(&mut self, _action: &LetterAction) -> bool {
        true
    }

    /// Called as soon as an entry reaches its outcome, before the next one starts.
    fn entry_finished(&mut self, _report: &EntryReport) {}
}

/// Hooks that approve everything and report nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl RestoreHooks for AutoApprove {}

pub struct Restorer<'a> {
    directory: &'a dyn VolumeDirectory,
    mutator: &'a dyn VolumeLetterMutator,
    options: RestoreOptions,
}

impl<'a> Restorer<'a> {
    pub fn new(
        directory: &'a dyn VolumeDirectory,
        mutator: &'a dyn VolumeLetterMutator,
        options: RestoreOptions,
    ) -> Self {
        Self {
            directory,
            mutator,
            options,
        }
    }

    /// Privilege check followed by [`Restorer::restore`].
    pub fn run(
        &self,
        probe: &dyn PrivilegeProbe,
        mapping: &Mapping,
        hooks: &mut dyn RestoreHooks,
    ) -> Result<RestoreReport> {
        ensure_elevated(probe)?;
        self.restore(mapping, hooks)
    }

    /// Reconcile every mapping entry.
    ///
    /// Only an enumeration failure before the first entry is fatal. Every
    /// other problem is recorded on its entry.
    pub fn restore(
        &self,
        mapping: &Mapping,
        hooks: &mut dyn RestoreHooks,
    ) -> Result<RestoreReport> {
        for lint in mapping.lint() {
            warn!("Mapping: {}", lint);
        }

        info!(
            entries = mapping.len(),
            dry_run = self.options.dry_run,
            confirm_each = self.options.confirm_each,
            "Restoring drive letters"
        );

        let mut report = RestoreReport {
            dry_run: self.options.dry_run,
            entries: Vec::with_capacity(mapping.len()),
        };
        let mut overlay = PreviewOverlay::default();

        for (position, entry) in mapping.iter().enumerate() {
            let entry_report = match self.enumerate(&overlay) {
                Ok(volumes) => self.process_entry(position, *entry, &volumes, &mut overlay, hooks),
                Err(e) if position == 0 => {
                    error!("Volume enumeration failed before any entry: {}", e);
                    return Err(RunError::from_enumeration(e));
                }
                Err(e) => {
                    error!(letter = %entry.letter, "Volume enumeration failed: {}", e);
                    EntryReport {
                        position,
                        entry: *entry,
                        target: None,
                        conflict: None,
                        actions: Vec::new(),
                        outcome: EntryOutcome::EnumerationFailed { reason: e.to_string() },
                    }
                }
            };

            hooks.entry_finished(&entry_report);
            report.entries.push(entry_report);
        }

        info!("Restore finished: {}", report.summary());
        Ok(report)
    }

    fn enumerate(&self, overlay: &PreviewOverlay) -> std::result::Result<Vec<Volume>, VolumeError> {
        let volumes = self.directory.list_volumes()?;
        debug!("Enumerated {} volumes", volumes.len());
        Ok(overlay.apply(volumes))
    }

    fn process_entry(
        &self,
        position: usize,
        entry: MappingEntry,
        volumes: &[Volume],
        overlay: &mut PreviewOverlay,
        hooks: &mut dyn RestoreHooks,
    ) -> EntryReport {
        let letter = entry.letter;
        let mut report = EntryReport {
            position,
            entry,
            target: None,
            conflict: None,
            actions: Vec::new(),
            outcome: EntryOutcome::NotFound,
        };

        let Some(target) = volumes.iter().find(|volume| volume.has_id(&entry.id)).cloned() else {
            warn!(%letter, id = %entry.id, "No volume with this identifier");
            return report;
        };
        report.target = Some(target.clone());

        if target.holds(letter) {
            debug!(%letter, "Already assigned to {}", target.location());
            report.outcome = EntryOutcome::AlreadyCorrect;
            return report;
        }

        // Step 2 guarantees any holder is a different volume.
        let conflict = volumes.iter().find(|volume| volume.holds(letter)).cloned();
        report.conflict = conflict.clone();

        if let Some(holder) = conflict {
            info!(%letter, "Letter held by {}; removing it first", holder.location());
            let action = LetterAction::Unassign {
                volume: holder,
                letter,
            };
            let status = self.execute(&action, overlay, hooks);
            report.actions.push(ActionRecord {
                action,
                status: status.clone(),
            });

            match status {
                ActionStatus::Declined => {
                    report.outcome = EntryOutcome::Skipped;
                    return report;
                }
                ActionStatus::Failed { reason } => {
                    report.outcome = EntryOutcome::ConflictUnassignFailed { reason };
                    return report;
                }
                ActionStatus::Applied | ActionStatus::Previewed => {}
            }
        }

        let action = LetterAction::Assign {
            volume: target,
            letter,
        };
        let status = self.execute(&action, overlay, hooks);
        report.actions.push(ActionRecord {
            action,
            status: status.clone(),
        });

        report.outcome = match status {
            ActionStatus::Applied | ActionStatus::Previewed => EntryOutcome::Assigned,
            ActionStatus::Declined => EntryOutcome::Skipped,
            ActionStatus::Failed { reason } => EntryOutcome::AssignFailed { reason },
        };
        report
    }

    /// Run one mutation through the dry-run and confirmation gates.
    fn execute(
        &self,
        action: &LetterAction,
        overlay: &mut PreviewOverlay,
        hooks: &mut dyn RestoreHooks,
    ) -> ActionStatus {
        if self.options.dry_run {
            info!("Dry run: would {}", action);
            overlay.record(action);
            return ActionStatus::Previewed;
        }

        if self.options.confirm_each && !hooks.confirm(action) {
            info!("Declined: {}", action);
            return ActionStatus::Declined;
        }

        let volume = action.volume();
        let result = match action {
            LetterAction::Unassign { letter, .. } => {
                self.mutator
                    .unassign_letter(volume.disk_index, volume.partition_index, *letter)
            }
            LetterAction::Assign { letter, .. } => {
                self.mutator
                    .assign_letter(volume.disk_index, volume.partition_index, *letter)
            }
        };

        match result {
            Ok(()) => {
                info!("Applied: {}", action);
                ActionStatus::Applied
            }
            Err(e) => {
                error!("Failed to {}: {}", action, e);
                ActionStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
