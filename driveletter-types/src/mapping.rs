// SPDX-License-Identifier: GPL-3.0-only

//! Letter-to-identifier mapping and its TOML configuration format
//!
//! ```toml
//! [[entry]]
//! letter = "D"
//! id = "6f1e1c2a-93b4-4c55-9b0e-0d9f3a6b7c11"
//! ```
//!
//! Entries keep file order. Duplicate letters or identifiers parse fine and
//! are reported by [`Mapping::lint`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DriveLetter, Volume, VolumeId};

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("invalid drive letter '{0}'")]
    InvalidLetter(String),
    #[error("invalid volume identifier '{0}'")]
    InvalidVolumeId(String),
    #[error("mapping parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("mapping render error: {0}")]
    Render(#[from] toml::ser::Error),
}

/// One desired assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingEntry {
    pub letter: DriveLetter,
    pub id: VolumeId,
}

impl MappingEntry {
    pub fn new(letter: DriveLetter, id: VolumeId) -> Self {
        Self { letter, id }
    }
}

impl fmt::Display for MappingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: -> {}", self.letter, self.id)
    }
}

/// Ordered desired state. Unknown tables and keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mapping {
    #[serde(default, rename = "entry")]
    entries: Vec<MappingEntry>,
}

impl Mapping {
    pub fn new(entries: Vec<MappingEntry>) -> Self {
        Self { entries }
    }

    /// Build the mapping that describes the given volumes as they are now.
    ///
    /// Volumes without a letter or identifier are left out; the rest are
    /// ordered by letter.
    pub fn from_volumes<'a>(volumes: impl IntoIterator<Item = &'a Volume>) -> Self {
        let mut entries: Vec<MappingEntry> = volumes
            .into_iter()
            .filter_map(|volume| match (volume.current_letter, volume.durable_id) {
                (Some(letter), Some(id)) => Some(MappingEntry::new(letter, id)),
                _ => None,
            })
            .collect();
        entries.sort_by_key(|entry| entry.letter);
        Self { entries }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, MappingError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn to_toml_string(&self) -> Result<String, MappingError> {
        Ok(toml::to_string(self)?)
    }

    /// Well-formedness findings. None of them stop a restore.
    pub fn lint(&self) -> Vec<MappingLint> {
        let mut by_letter: BTreeMap<DriveLetter, Vec<usize>> = BTreeMap::new();
        let mut by_id: BTreeMap<VolumeId, Vec<usize>> = BTreeMap::new();

        for (position, entry) in self.entries.iter().enumerate() {
            by_letter.entry(entry.letter).or_default().push(position);
            by_id.entry(entry.id).or_default().push(position);
        }

        let letters = by_letter
            .into_iter()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(letter, positions)| MappingLint::DuplicateLetter { letter, positions });
        let ids = by_id
            .into_iter()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(id, positions)| MappingLint::DuplicateId { id, positions });

        letters.chain(ids).collect()
    }
}

impl FromIterator<MappingEntry> for Mapping {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Mapping well-formedness finding (positions are zero-based entry indexes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingLint {
    DuplicateLetter {
        letter: DriveLetter,
        positions: Vec<usize>,
    },
    DuplicateId {
        id: VolumeId,
        positions: Vec<usize>,
    },
}

impl fmt::Display for MappingLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLetter { letter, positions } => write!(
                f,
                "letter {letter}: appears in entries {positions:?}; later entries win"
            ),
            Self::DuplicateId { id, positions } => write!(
                f,
                "identifier {id} appears in entries {positions:?}; the volume ends at the last letter"
            ),
        }
    }
}
