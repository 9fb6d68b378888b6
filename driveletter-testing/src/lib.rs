// SPDX-License-Identifier: GPL-3.0-only

//! Test doubles for driveletter
//!
//! [`machine::FakeMachine`] implements every collaborator contract over an
//! in-memory volume table, with the same letter rules as the real platform
//! and hooks for injecting failures. Labs are TOML fixtures under
//! `resources/volume-labs` that seed a machine.

pub mod errors;
pub mod lab;
pub mod ledger;
pub mod machine;

pub use lab::VolumeLab;
pub use ledger::MachineCall;
pub use machine::FakeMachine;
