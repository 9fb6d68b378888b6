// SPDX-License-Identifier: GPL-3.0-only

use crate::VolumeError;

/// Reports whether the process runs with the rights volume changes need
pub trait PrivilegeProbe: Send + Sync {
    fn is_elevated(&self) -> Result<bool, VolumeError>;
}

impl<T: PrivilegeProbe + ?Sized> PrivilegeProbe for &T {
    fn is_elevated(&self) -> Result<bool, VolumeError> {
        (**self).is_elevated()
    }
}
