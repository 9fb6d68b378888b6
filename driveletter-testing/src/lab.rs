// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use driveletter_types::{DriveLetter, Volume, VolumeId};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TestingError};
use crate::machine::FakeMachine;

/// Seed state for a [`FakeMachine`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeLab {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_elevated")]
    pub elevated: bool,
    pub volumes: Vec<LabVolume>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabVolume {
    pub disk: u32,
    pub partition: u32,
    pub letter: Option<DriveLetter>,
    pub id: Option<VolumeId>,
}

fn default_elevated() -> bool {
    true
}

impl LabVolume {
    pub fn to_volume(&self) -> Volume {
        Volume {
            durable_id: self.id,
            current_letter: self.letter,
            disk_index: self.disk,
            partition_index: self.partition,
        }
    }
}

impl VolumeLab {
    pub fn volumes(&self) -> Vec<Volume> {
        self.volumes.iter().map(LabVolume::to_volume).collect()
    }

    pub fn machine(&self) -> FakeMachine {
        let machine = FakeMachine::new(self.volumes());
        machine.set_elevated(self.elevated);
        machine
    }
}

pub fn workspace_root() -> PathBuf {
    if let Ok(value) = std::env::var("DRIVELETTER_TESTING_WORKSPACE_ROOT") {
        return PathBuf::from(value);
    }

    if let Ok(current_dir) = std::env::current_dir()
        && current_dir.join("resources/volume-labs").exists()
    {
        return current_dir;
    }

    let manifest_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    if manifest_root.join("resources/volume-labs").exists() {
        return manifest_root;
    }

    PathBuf::from(".")
}

pub fn labs_root() -> PathBuf {
    workspace_root().join("resources/volume-labs")
}

pub fn lab_path_for_name(lab_name: &str) -> PathBuf {
    labs_root().join(format!("{}.toml", lab_name))
}

pub fn load_by_name(lab_name: &str) -> Result<VolumeLab> {
    let path = lab_path_for_name(lab_name);
    if !path.exists() {
        return Err(TestingError::LabNotFound {
            lab_name: lab_name.to_string(),
        });
    }

    let raw = fs::read_to_string(&path).map_err(|error| TestingError::LabInvalid {
        lab_name: lab_name.to_string(),
        reason: error.to_string(),
    })?;

    parse(lab_name, &raw)
}

pub fn parse(lab_name: &str, raw: &str) -> Result<VolumeLab> {
    let lab: VolumeLab = toml::from_str(raw).map_err(|error| TestingError::LabInvalid {
        lab_name: lab_name.to_string(),
        reason: error.to_string(),
    })?;

    validate(&lab)?;
    Ok(lab)
}

/// A lab must describe a machine the platform could actually be in.
pub fn validate(lab: &VolumeLab) -> Result<()> {
    let invalid = |reason: String| TestingError::LabInvalid {
        lab_name: if lab.name.is_empty() {
            "<unknown>".to_string()
        } else {
            lab.name.clone()
        },
        reason,
    };

    if lab.name.is_empty() {
        return Err(invalid("name must not be empty".to_string()));
    }

    let mut handles = HashSet::new();
    let mut letters = HashSet::new();
    let mut ids = HashSet::new();

    for volume in &lab.volumes {
        if !handles.insert((volume.disk, volume.partition)) {
            return Err(invalid(format!(
                "disk {} partition {} listed twice",
                volume.disk, volume.partition
            )));
        }
        if let Some(letter) = volume.letter
            && !letters.insert(letter)
        {
            return Err(invalid(format!("letter {letter} held by two volumes")));
        }
        if let Some(id) = volume.id
            && !ids.insert(id)
        {
            return Err(invalid(format!("identifier {id} used by two volumes")));
        }
    }

    Ok(())
}
