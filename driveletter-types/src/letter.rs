// SPDX-License-Identifier: GPL-3.0-only

//! Drive letter value type

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::MappingError;

/// A single uppercase drive letter (`A`..=`Z`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriveLetter(char);

impl DriveLetter {
    /// Build a letter from a character, normalising to uppercase.
    pub fn new(value: char) -> Result<Self, MappingError> {
        if value.is_ascii_alphabetic() {
            Ok(Self(value.to_ascii_uppercase()))
        } else {
            Err(MappingError::InvalidLetter(value.to_string()))
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Access path form used by the platform tooling (e.g. `E:\`)
    pub fn access_path(self) -> String {
        format!("{}:\\", self.0)
    }
}

impl fmt::Display for DriveLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DriveLetter {
    type Err = MappingError;

    /// Accepts `e`, `E`, `E:` and `E:\`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.trim_end_matches('\\');
        let bare = bare.strip_suffix(':').unwrap_or(bare);

        let mut chars = bare.chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) => Self::new(value)
                .map_err(|_| MappingError::InvalidLetter(trimmed.to_string())),
            _ => Err(MappingError::InvalidLetter(trimmed.to_string())),
        }
    }
}

impl Serialize for DriveLetter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DriveLetter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
