// SPDX-License-Identifier: GPL-3.0-only

pub mod protocol;
pub mod traits;

pub use protocol::{VolumeError, VolumeErrorKind};
pub use traits::{PrivilegeProbe, VolumeDirectory, VolumeLetterMutator};
