// SPDX-License-Identifier: GPL-3.0-only

pub mod directory;
pub mod mutator;
pub mod privilege;

pub use directory::VolumeDirectory;
pub use mutator::VolumeLetterMutator;
pub use privilege::PrivilegeProbe;
