// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Explorer configuration
//!
//! Everything has a default; a TOML file is only read when the user passes
//! `--config`. The exclusion set is built once from this configuration and
//! handed to the walker by value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::exclusion::{ExclusionSet, DEFAULT_EXCLUSIONS};
use crate::namespace::NamespacePath;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Config(format!(
                "Unknown format '{}'. Supported: text, json",
                other
            ))),
        }
    }
}

/// Explorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Namespace the console walk starts from
    pub start_namespace: String,
    /// Substrings that exclude a class (replaces the built-in list)
    pub exclusions: Vec<String>,
    /// Substrings appended to `exclusions`
    pub extra_exclusions: Vec<String>,
    /// Apply exclusion filtering during the walk
    pub apply_exclusions: bool,
    /// Stop descending below this many levels under the start namespace
    pub max_depth: Option<usize>,
    pub format: OutputFormat,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            start_namespace: "root".into(),
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            extra_exclusions: Vec::new(),
            apply_exclusions: true,
            max_depth: None,
            format: OutputFormat::Text,
        }
    }
}

impl ExplorerConfig {
    /// Load from TOML file
    pub fn from_toml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.start_path().map(|_| ())
    }

    pub fn start_path(&self) -> Result<NamespacePath> {
        NamespacePath::parse(&self.start_namespace)
    }

    /// Build the immutable exclusion set for a walk
    pub fn exclusion_set(&self) -> ExclusionSet {
        if !self.apply_exclusions {
            return ExclusionSet::empty();
        }
        ExclusionSet::new(self.exclusions.iter().cloned())
            .extended(self.extra_exclusions.iter().cloned())
    }

    /// Generate sample config
    pub fn sample_toml() -> String {
        r#"# WMI Explorer configuration
start_namespace = "root"
apply_exclusions = true
format = "text"
# max_depth = 2

# Replaces the built-in exclusion list when present
# exclusions = ["PnPEntity", "Process", "DataFile"]

# Appended to the exclusion list
extra_exclusions = []
"#
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::default();
        assert_eq!(config.start_namespace, "root");
        assert!(config.apply_exclusions);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.exclusion_set(), ExclusionSet::default());
    }

    #[test]
    fn test_sample_toml_parses() {
        let config = ExplorerConfig::from_toml(&ExplorerConfig::sample_toml()).unwrap();
        assert_eq!(config.start_path().unwrap(), NamespacePath::root());
        assert!(config.exclusion_set().is_excluded("Win32_PnPEntity"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExplorerConfig::from_toml("format = \"json\"\nmax_depth = 1\n").unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.max_depth, Some(1));
        assert_eq!(config.exclusions.len(), DEFAULT_EXCLUSIONS.len());
    }

    #[test]
    fn test_replace_and_extend_exclusions() {
        let config = ExplorerConfig::from_toml(
            "exclusions = [\"Fan\"]\nextra_exclusions = [\"Battery\"]\n",
        )
        .unwrap();
        let set = config.exclusion_set();
        assert!(set.is_excluded("Win32_Fan"));
        assert!(set.is_excluded("Win32_Battery"));
        assert!(!set.is_excluded("Win32_PnPEntity"));
    }

    #[test]
    fn test_disabled_exclusions() {
        let config = ExplorerConfig::from_toml("apply_exclusions = false").unwrap();
        assert!(config.exclusion_set().is_empty());
    }

    #[test]
    fn test_invalid_namespace_rejected() {
        let err = ExplorerConfig::from_toml("start_namespace = \"\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = ExplorerConfig::from_toml("format = [").unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
