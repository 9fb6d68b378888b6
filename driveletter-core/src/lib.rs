// SPDX-License-Identifier: GPL-3.0-only

//! Drive letter export and restore
//!
//! The exporter turns a live volume enumeration into a [`Mapping`]. The
//! restorer walks a mapping in order and reconciles each entry against a
//! fresh enumeration, evicting whichever volume holds the wanted letter.
//!
//! Both only talk to the machine through the traits in
//! `driveletter-contracts`, so they run unchanged against the PowerShell
//! backend and the in-memory machine used by the tests.
//!
//! [`Mapping`]: driveletter_types::Mapping

pub mod error;
pub mod export;
pub mod preflight;
pub mod preview;
pub mod restore;

pub use error::{Result, RunError};
pub use export::export;
pub use preflight::ensure_elevated;
pub use restore::{AutoApprove, RestoreHooks, RestoreOptions, Restorer};
