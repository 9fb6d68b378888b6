// SPDX-License-Identifier: GPL-3.0-only

//! Volume data model
//!
//! A `Volume` is one enumerated partition as seen by the volume directory at
//! call time. Only `durable_id` carries identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::{DriveLetter, MappingError};

/// Stable per-volume identifier (a partition GUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VolumeId(Uuid);

impl fmt::Display for VolumeId {
    /// Hyphenated lowercase, without braces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for VolumeId {
    type Err = MappingError;

    /// Accepts plain, hyphenated, braced (`{...}`) and URN forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Uuid::try_parse(trimmed)
            .map(Self)
            .map_err(|_| MappingError::InvalidVolumeId(trimmed.to_string()))
    }
}

impl Serialize for VolumeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VolumeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Enumerated volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Durable identifier, absent for partitions that carry none (e.g. MBR)
    pub durable_id: Option<VolumeId>,

    /// Letter currently assigned, if any
    pub current_letter: Option<DriveLetter>,

    /// Disk number used to address mutation calls
    pub disk_index: u32,

    /// Partition number on that disk
    pub partition_index: u32,
}

impl Volume {
    /// True when the volume can take part in a mapping.
    pub fn is_mappable(&self) -> bool {
        self.durable_id.is_some() && self.current_letter.is_some()
    }

    pub fn has_id(&self, id: &VolumeId) -> bool {
        self.durable_id.as_ref() == Some(id)
    }

    pub fn holds(&self, letter: DriveLetter) -> bool {
        self.current_letter == Some(letter)
    }

    /// Short positional description for status output
    pub fn location(&self) -> String {
        format!("disk {} partition {}", self.disk_index, self.partition_index)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location())?;
        if let Some(id) = &self.durable_id {
            write!(f, " ({id})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "6f1e1c2a-93b4-4c55-9b0e-0d9f3a6b7c11";

    #[test]
    fn strips_braces_and_lowercases() {
        let id: VolumeId = "{6F1E1C2A-93B4-4C55-9B0E-0D9F3A6B7C11}".parse().unwrap();
        assert_eq!(id.to_string(), RAW);
    }

    #[test]
    fn braced_and_plain_forms_are_equal() {
        let braced: VolumeId = format!("{{{RAW}}}").parse().unwrap();
        let plain: VolumeId = RAW.parse().unwrap();
        assert_eq!(braced, plain);
    }

    #[test]
    fn rejects_garbage_identifier() {
        assert!("not-a-guid".parse::<VolumeId>().is_err());
    }

    #[test]
    fn test_volume_serialization() {
        let volume = Volume {
            durable_id: Some(RAW.parse().unwrap()),
            current_letter: Some(DriveLetter::new('D').unwrap()),
            disk_index: 1,
            partition_index: 2,
        };

        let json = serde_json::to_string(&volume).unwrap();
        assert!(json.contains(RAW));
        let deserialized: Volume = serde_json::from_str(&json).unwrap();

        assert_eq!(volume, deserialized);
    }

    #[test]
    fn mappable_requires_letter_and_id() {
        let mut volume = Volume {
            durable_id: Some(RAW.parse().unwrap()),
            current_letter: None,
            disk_index: 0,
            partition_index: 1,
        };
        assert!(!volume.is_mappable());

        volume.current_letter = Some(DriveLetter::new('C').unwrap());
        assert!(volume.is_mappable());

        volume.durable_id = None;
        assert!(!volume.is_mappable());
    }
}
