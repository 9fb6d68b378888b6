// SPDX-License-Identifier: GPL-3.0-only

//! Restore run results
//!
//! One `EntryReport` per mapping entry, in mapping order. Reports are
//! serializable so the CLI can emit them as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DriveLetter, MappingEntry, Volume};

/// A single letter mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LetterAction {
    /// Remove `letter` from a volume that currently holds it
    Unassign { volume: Volume, letter: DriveLetter },
    /// Give `letter` to the entry's target volume
    Assign { volume: Volume, letter: DriveLetter },
}

impl LetterAction {
    pub fn volume(&self) -> &Volume {
        match self {
            Self::Unassign { volume, .. } | Self::Assign { volume, .. } => volume,
        }
    }
}

impl fmt::Display for LetterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassign { volume, letter } => write!(f, "remove {letter}: from {volume}"),
            Self::Assign { volume, letter } => write!(f, "assign {letter}: to {volume}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionStatus {
    /// Executed against the mutator
    Applied,
    /// Dry run: recorded as if it succeeded
    Previewed,
    /// Operator declined the confirmation
    Declined,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: LetterAction,
    #[serde(flatten)]
    pub status: ActionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutcomeSeverity {
    Ok,
    Warning,
    Error,
}

/// Terminal state of one mapping entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EntryOutcome {
    Assigned,
    AlreadyCorrect,
    NotFound,
    Skipped,
    ConflictUnassignFailed { reason: String },
    AssignFailed { reason: String },
    /// The fresh enumeration for this entry failed after the run had started
    EnumerationFailed { reason: String },
}

impl EntryOutcome {
    pub fn severity(&self) -> OutcomeSeverity {
        match self {
            Self::Assigned | Self::AlreadyCorrect => OutcomeSeverity::Ok,
            Self::NotFound | Self::Skipped => OutcomeSeverity::Warning,
            Self::ConflictUnassignFailed { .. }
            | Self::AssignFailed { .. }
            | Self::EnumerationFailed { .. } => OutcomeSeverity::Error,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.severity() == OutcomeSeverity::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReport {
    /// Zero-based index into the mapping
    pub position: usize,
    pub entry: MappingEntry,
    /// Volume resolved by identifier, as seen before any action
    pub target: Option<Volume>,
    /// Different volume that held the entry's letter, as seen before any action
    pub conflict: Option<Volume>,
    pub actions: Vec<ActionRecord>,
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

impl EntryReport {
    pub fn is_preview(&self) -> bool {
        self.actions
            .iter()
            .any(|record| record.status == ActionStatus::Previewed)
    }

    /// One human-readable line describing the entry's result.
    pub fn status_line(&self) -> String {
        let letter = self.entry.letter;
        let id = self.entry.id;
        let detail = match &self.outcome {
            EntryOutcome::Assigned => {
                let verb = if self.is_preview() {
                    "would assign"
                } else {
                    "assigned"
                };
                let target = self
                    .target
                    .as_ref()
                    .map(Volume::location)
                    .unwrap_or_else(|| id.to_string());
                match &self.conflict {
                    Some(conflict) => format!(
                        "{verb} to {target} after removing it from {}",
                        conflict.location()
                    ),
                    None => format!("{verb} to {target}"),
                }
            }
            EntryOutcome::AlreadyCorrect => "already correct".to_string(),
            EntryOutcome::NotFound => format!("not found: no volume with id {id}"),
            EntryOutcome::Skipped => {
                let declined = self
                    .actions
                    .iter()
                    .find(|record| record.status == ActionStatus::Declined)
                    .map(|record| record.action.to_string())
                    .unwrap_or_else(|| "action".to_string());
                format!("skipped: declined to {declined}")
            }
            EntryOutcome::ConflictUnassignFailed { reason } => {
                let holder = self
                    .conflict
                    .as_ref()
                    .map(Volume::location)
                    .unwrap_or_else(|| "its holder".to_string());
                format!("failed to remove letter from {holder}: {reason}")
            }
            EntryOutcome::AssignFailed { reason } => format!("failed to assign: {reason}"),
            EntryOutcome::EnumerationFailed { reason } => {
                format!("failed to enumerate volumes: {reason}")
            }
        };

        let tag = match self.outcome.severity() {
            OutcomeSeverity::Ok => "OK",
            OutcomeSeverity::Warning => "WARN",
            OutcomeSeverity::Error => "FAIL",
        };

        format!("{tag:<4} {letter}: {detail}")
    }
}

/// Per-outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreSummary {
    pub assigned: usize,
    pub already_correct: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for RestoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assigned={} already_correct={} not_found={} skipped={} failed={}",
            self.assigned, self.already_correct, self.not_found, self.skipped, self.failed
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreReport {
    pub dry_run: bool,
    pub entries: Vec<EntryReport>,
}

impl RestoreReport {
    pub fn summary(&self) -> RestoreSummary {
        let mut summary = RestoreSummary::default();
        for report in &self.entries {
            match report.outcome {
                EntryOutcome::Assigned => summary.assigned += 1,
                EntryOutcome::AlreadyCorrect => summary.already_correct += 1,
                EntryOutcome::NotFound => summary.not_found += 1,
                EntryOutcome::Skipped => summary.skipped += 1,
                EntryOutcome::ConflictUnassignFailed { .. }
                | EntryOutcome::AssignFailed { .. }
                | EntryOutcome::EnumerationFailed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|report| report.outcome.is_failure())
    }

    /// Every action in execution order across all entries
    pub fn actions(&self) -> impl Iterator<Item = &ActionRecord> {
        self.entries.iter().flat_map(|report| report.actions.iter())
    }
}
