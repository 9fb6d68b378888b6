// SPDX-License-Identifier: GPL-3.0-only

use driveletter_types::Volume;

use crate::VolumeError;

/// Live enumeration of the machine's volumes
pub trait VolumeDirectory: Send + Sync {
    /// Every volume as it is at call time. Implementations must not cache.
    fn list_volumes(&self) -> Result<Vec<Volume>, VolumeError>;
}

impl<T: VolumeDirectory + ?Sized> VolumeDirectory for &T {
    fn list_volumes(&self) -> Result<Vec<Volume>, VolumeError> {
        (**self).list_volumes()
    }
}
