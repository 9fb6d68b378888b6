// SPDX-License-Identifier: GPL-3.0-only

use driveletter_contracts::{PrivilegeProbe, VolumeDirectory};
use driveletter_types::Mapping;
use tracing::{debug, info};

use crate::preflight::ensure_elevated;
use crate::{Result, RunError};

/// Capture the current letter assignments as a mapping.
///
/// Volumes missing a letter or an identifier (reserved, recovery, MBR) are
/// skipped. Entries come out sorted by letter. Nothing is mutated.
pub fn export(probe: &dyn PrivilegeProbe, directory: &dyn VolumeDirectory) -> Result<Mapping> {
    ensure_elevated(probe)?;

    let volumes = directory
        .list_volumes()
        .map_err(RunError::from_enumeration)?;
    debug!("Enumerated {} volumes", volumes.len());

    for volume in volumes.iter().filter(|volume| !volume.is_mappable()) {
        debug!("Skipping {} (no letter or identifier)", volume.location());
    }

    let mapping = Mapping::from_volumes(&volumes);
    info!("Exported {} of {} volumes", mapping.len(), volumes.len());
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use driveletter_contracts::{VolumeError, VolumeErrorKind};
    use driveletter_types::{DriveLetter, Volume};

    use super::*;

    struct Elevated(bool);

    impl PrivilegeProbe for Elevated {
        fn is_elevated(&self) -> std::result::Result<bool, VolumeError> {
            Ok(self.0)
        }
    }

    struct Snapshot(std::result::Result<Vec<Volume>, VolumeError>);

    impl VolumeDirectory for Snapshot {
        fn list_volumes(&self) -> std::result::Result<Vec<Volume>, VolumeError> {
            self.0.clone()
        }
    }

    fn volume(letter: Option<char>, id: Option<&str>, partition: u32) -> Volume {
        Volume {
            durable_id: id.map(|raw| raw.parse().unwrap()),
            current_letter: letter.map(|value| DriveLetter::new(value).unwrap()),
            disk_index: 0,
            partition_index: partition,
        }
    }

    #[test]
    fn exports_sorted_mappable_volumes() {
        let directory = Snapshot(Ok(vec![
            volume(Some('F'), Some("{AAAAAAAA-0000-0000-0000-000000000001}"), 4),
            volume(None, Some("aaaaaaaa-0000-0000-0000-000000000002"), 1),
            volume(Some('C'), Some("aaaaaaaa-0000-0000-0000-000000000003"), 3),
            volume(Some('D'), None, 2),
        ]));

        let mapping = export(&Elevated(true), &directory).unwrap();

        let rendered: Vec<String> = mapping
            .iter()
            .map(|entry| format!("{}={}", entry.letter, entry.id))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "C=aaaaaaaa-0000-0000-0000-000000000003",
                "F=aaaaaaaa-0000-0000-0000-000000000001",
            ]
        );
    }

    #[test]
    fn refuses_without_privilege() {
        let directory = Snapshot(Ok(Vec::new()));
        let error = export(&Elevated(false), &directory).unwrap_err();
        assert!(matches!(error, RunError::Permission(_)));
    }

    #[test]
    fn enumeration_failure_is_fatal() {
        let directory = Snapshot(Err(VolumeError::new(
            VolumeErrorKind::Internal,
            "Get-Partition failed",
        )));
        let error = export(&Elevated(true), &directory).unwrap_err();
        assert!(matches!(error, RunError::Enumeration(_)));
    }

    #[test]
    fn denied_enumeration_is_permission_error() {
        let directory = Snapshot(Err(VolumeError::permission_denied("access denied")));
        let error = export(&Elevated(true), &directory).unwrap_err();
        assert!(matches!(error, RunError::Permission(_)));
    }
}
