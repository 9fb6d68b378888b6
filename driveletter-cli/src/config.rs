// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use driveletter_types::Mapping;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mapping compiled into the binary, used when nothing else is configured
pub const DEFAULT_MAPPING: &str = include_str!("../resources/default-mapping.toml");

pub const CONFIG_ENV: &str = "DRIVELETTER_CONFIG";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mapping_file: Option<PathBuf>,
    pub log_level: LoggingLevel,
    pub log_to_disk: bool,
    pub log_dir: Option<PathBuf>,

    /// Directory of the file this config was read from
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// Where the restore mapping came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    Argument(PathBuf),
    Config(PathBuf),
    Embedded,
}

impl std::fmt::Display for MappingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Argument(path) => write!(f, "{} (--mapping)", path.display()),
            Self::Config(path) => write!(f, "{} (config)", path.display()),
            Self::Embedded => write!(f, "built-in default"),
        }
    }
}

impl Config {
    /// Load from `explicit`, else `DRIVELETTER_CONFIG`, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config: Config =
            toml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn configured_mapping_path(&self) -> Option<PathBuf> {
        let path = self.mapping_file.as_ref()?;
        match &self.base_dir {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path.clone()),
        }
    }

    /// `--mapping` wins over the config file, which wins over the built-in default.
    pub fn resolve_mapping(&self, argument: Option<&Path>) -> Result<(Mapping, MappingSource)> {
        let source = match argument {
            Some(path) => MappingSource::Argument(path.to_path_buf()),
            None => match self.configured_mapping_path() {
                Some(path) => MappingSource::Config(path),
                None => MappingSource::Embedded,
            },
        };

        let mapping = match &source {
            MappingSource::Argument(path) | MappingSource::Config(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("read mapping {}", path.display()))?;
                Mapping::from_toml_str(&raw)
                    .with_context(|| format!("parse mapping {}", path.display()))?
            }
            MappingSource::Embedded => {
                Mapping::from_toml_str(DEFAULT_MAPPING).context("parse built-in mapping")?
            }
        };

        Ok((mapping, source))
    }
}
