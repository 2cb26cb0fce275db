// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Namespace paths and class descriptors
//!
//! A namespace path is an ordered list of segments (`root`, `root\cimv2`, ...).
//! Paths are immutable; descending into a child produces a new path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Name of the top of every WMI namespace tree
pub const ROOT_NAMESPACE: &str = "root";

/// Segment separator used by WMI object paths
pub const SEPARATOR: char = '\\';

/// A node in the instrumentation namespace tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    /// The `root` namespace
    pub fn root() -> Self {
        Self {
            segments: vec![ROOT_NAMESPACE.to_string()],
        }
    }

    /// Parse `root\cimv2` style paths. Forward slashes are accepted too.
    pub fn parse(path: &str) -> Result<Self, Error> {
        let segments: Vec<String> = path
            .split(|c| c == SEPARATOR || c == '/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if segments.is_empty() {
            return Err(Error::Config(format!("Invalid namespace path: '{}'", path)));
        }
        Ok(Self { segments })
    }

    /// Derive the path of a direct child namespace
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments below the starting one (`root` is 0)
    pub fn depth(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

impl Default for NamespacePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for NamespacePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NamespacePath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NamespacePath> for String {
    fn from(path: NamespacePath) -> Self {
        path.to_string()
    }
}

/// A class discovered at one namespace during a walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub namespace: NamespacePath,
    pub name: String,
}

impl ClassDescriptor {
    pub fn new(namespace: NamespacePath, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}
