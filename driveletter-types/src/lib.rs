// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for driveletter
//!
//! These types are the single source of truth shared by every layer:
//!
//! - **driveletter-sys**: builds `Volume` values from the platform storage tooling
//! - **driveletter-core**: consumes volumes and a `Mapping`, produces a `RestoreReport`
//! - **driveletter-cli**: renders mappings and reports for the operator
//!
//! ## Identity
//!
//! A volume is identified by its `VolumeId` only. Disk and partition indexes
//! are positional handles used to address mutation calls and may change
//! between boots.

pub mod letter;
pub mod mapping;
pub mod report;
pub mod volume;

pub use letter::DriveLetter;
pub use mapping::{Mapping, MappingEntry, MappingError, MappingLint};
pub use report::{
    ActionRecord, ActionStatus, EntryOutcome, EntryReport, LetterAction, OutcomeSeverity,
    RestoreReport, RestoreSummary,
};
pub use volume::{Volume, VolumeId};
