use anyhow::{Context, Result};
use librsao::{DecodeOptions, IndexLayout, SeparatorPolicy, UnusedGroupPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the `scan` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Glob matched against file names inside the scanned directory
    pub pattern: String,

    /// Descend into subdirectories
    pub recursive: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            pattern: "*.SAO".to_string(),
            recursive: false,
        }
    }
}

/// Configuration file layout: a `[decode]` table and a `[scan]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtlConfig {
    pub decode: DecodeOptions,
    pub scan: ScanSettings,
}

impl CtlConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: CtlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Loads `path` when given, the defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Every option spelled out, for `gen-config`.
    pub fn default_example() -> Self {
        Self {
            decode: DecodeOptions::default()
                .with_index_layout(IndexLayout::Sao4)
                .with_separators(SeparatorPolicy::Length)
                .with_unused_groups(UnusedGroupPolicy::Reject),
            scan: ScanSettings {
                pattern: "*.SAO".to_string(),
                recursive: true,
            },
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }
}
