// SPDX-License-Identifier: GPL-3.0-only

//! Storage cmdlet scripts and `Get-Partition` output parsing

use driveletter_types::{DriveLetter, Volume, VolumeId};
use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, SysError};

/// Every partition as a JSON array. `DriveLetter` is a char that is NUL when
/// unassigned, so it is converted to a string before serialization.
pub const LIST_SCRIPT: &str = "$rows = @(Get-Partition | Select-Object DiskNumber, PartitionNumber, \
     @{Name='DriveLetter';Expression={[string]$_.DriveLetter}}, Guid); \
     ConvertTo-Json -InputObject $rows -Compress";

pub const ELEVATION_SCRIPT: &str = "([Security.Principal.WindowsPrincipal]\
     [Security.Principal.WindowsIdentity]::GetCurrent()).IsInRole(\
     [Security.Principal.WindowsBuiltInRole]::Administrator)";

pub fn assign_script(disk_index: u32, partition_index: u32, letter: DriveLetter) -> String {
    format!(
        "Set-Partition -DiskNumber {} -PartitionNumber {} -NewDriveLetter {}",
        disk_index, partition_index, letter
    )
}

pub fn unassign_script(disk_index: u32, partition_index: u32, letter: DriveLetter) -> String {
    format!(
        "Remove-PartitionAccessPath -DiskNumber {} -PartitionNumber {} -AccessPath '{}'",
        disk_index,
        partition_index,
        letter.access_path()
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PartitionRow {
    disk_number: u32,
    partition_number: u32,
    drive_letter: Option<String>,
    guid: Option<String>,
}

/// Windows PowerShell 5.1 collapses single-element arrays in some paths.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Rows {
    Many(Vec<PartitionRow>),
    One(PartitionRow),
}

impl PartitionRow {
    fn into_volume(self) -> Result<Volume> {
        let current_letter = match self
            .drive_letter
            .as_deref()
            .map(|raw| raw.trim_matches(|c: char| c == '\0' || c.is_whitespace()))
        {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<DriveLetter>().map_err(|e| {
                SysError::Parse(format!(
                    "disk {} partition {}: {}",
                    self.disk_number, self.partition_number, e
                ))
            })?),
        };

        let durable_id = match self.guid.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<VolumeId>() {
                Ok(id) => Some(id),
                Err(e) => {
                    warn!(
                        "Ignoring identifier of disk {} partition {}: {}",
                        self.disk_number, self.partition_number, e
                    );
                    None
                }
            },
        };

        Ok(Volume {
            durable_id,
            current_letter,
            disk_index: self.disk_number,
            partition_index: self.partition_number,
        })
    }
}

/// Parse the output of [`LIST_SCRIPT`].
pub fn parse_partitions(json: &str) -> Result<Vec<Volume>> {
    let trimmed = json.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Rows = serde_json::from_str(trimmed)
        .map_err(|e| SysError::Parse(format!("Get-Partition JSON: {}", e)))?;

    let rows = match rows {
        Rows::Many(rows) => rows,
        Rows::One(row) => vec![row],
    };

    rows.into_iter().map(PartitionRow::into_volume).collect()
}

/// Parse the output of [`ELEVATION_SCRIPT`].
pub fn parse_elevation(output: &str) -> Result<bool> {
    match output.trim() {
        "True" => Ok(true),
        "False" => Ok(false),
        other => Err(SysError::Parse(format!(
            "expected True or False from elevation check, got '{}'",
            other
        ))),
    }
}
