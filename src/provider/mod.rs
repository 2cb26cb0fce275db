// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Instrumentation provider abstraction
//!
//! The walker and the interactive browser only ever talk to a [`Provider`].
//! On Windows the real implementation is backed by WMI ([`WmiProvider`]);
//! [`mock::MockProvider`] serves an in-memory namespace tree for tests,
//! benchmarks and `--demo` runs on any platform.
//!
//! Every call blocks until the provider answers. There is no timeout and no
//! retry; callers decide how to recover from a failure.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::namespace::NamespacePath;

pub mod mock;
#[cfg(windows)]
pub mod windows;
pub mod wql;

#[cfg(windows)]
pub use windows::WmiProvider;

/// Rendered in place of absent (null/empty) property values
pub const NOT_AVAILABLE: &str = "N/A";

/// One property of one instance (or of a class definition)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,
    pub value: Option<String>,
}

impl PropertyRecord {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Value text, or [`NOT_AVAILABLE`] when absent
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Capability surface of a system management instrumentation backend
pub trait Provider {
    /// Connection scoped to one namespace
    type Handle;
    /// One instance returned by an instance enumeration
    type Instance;

    /// Connect to a namespace. Unreachable or unauthorized namespaces fail
    /// with [`crate::Error::Connection`].
    fn connect(&self, path: &NamespacePath) -> Result<Self::Handle>;

    /// Names of the classes defined directly in the connected namespace
    fn list_classes(&self, handle: &Self::Handle) -> Result<Vec<String>>;

    /// Names (leaf segments) of the immediate child namespaces
    fn list_child_namespaces(&self, handle: &Self::Handle) -> Result<Vec<String>>;

    /// All instances of `class`
    fn list_instances(&self, handle: &Self::Handle, class: &str) -> Result<Vec<Self::Instance>>;

    /// Property name/value pairs of one instance
    fn instance_properties(
        &self,
        handle: &Self::Handle,
        instance: &Self::Instance,
    ) -> Result<Vec<PropertyRecord>>;

    /// Schema-level properties of `class` with their current (default)
    /// values, fetched once from the class definition
    fn class_properties(&self, handle: &Self::Handle, class: &str) -> Result<Vec<PropertyRecord>>;
}

impl<P: Provider + ?Sized> Provider for &P {
    type Handle = P::Handle;
    type Instance = P::Instance;

    fn connect(&self, path: &NamespacePath) -> Result<Self::Handle> {
        (**self).connect(path)
    }

    fn list_classes(&self, handle: &Self::Handle) -> Result<Vec<String>> {
        (**self).list_classes(handle)
    }

    fn list_child_namespaces(&self, handle: &Self::Handle) -> Result<Vec<String>> {
        (**self).list_child_namespaces(handle)
    }

    fn list_instances(&self, handle: &Self::Handle, class: &str) -> Result<Vec<Self::Instance>> {
        (**self).list_instances(handle, class)
    }

    fn instance_properties(
        &self,
        handle: &Self::Handle,
        instance: &Self::Instance,
    ) -> Result<Vec<PropertyRecord>> {
        (**self).instance_properties(handle, instance)
    }

    fn class_properties(&self, handle: &Self::Handle, class: &str) -> Result<Vec<PropertyRecord>> {
        (**self).class_properties(handle, class)
    }
}

/// Live provider for this platform
#[cfg(windows)]
pub fn default_provider() -> Result<WmiProvider> {
    Ok(WmiProvider::new())
}

/// Live provider for this platform. WMI exists only on Windows.
#[cfg(not(windows))]
pub fn default_provider() -> Result<mock::MockProvider> {
    Err(crate::Error::UnsupportedPlatform(format!(
        "WMI is only available on Windows (running on {}); use --demo for sample data",
        std::env::consts::OS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_default_provider_unsupported() {
        match default_provider() {
            Err(crate::Error::UnsupportedPlatform(msg)) => assert!(msg.contains("--demo")),
            _ => panic!("expected UnsupportedPlatform"),
        }
    }

    #[test]
    fn test_display_value_sentinel() {
        let present = PropertyRecord::new("Name", Some("foo".into()));
        let absent = PropertyRecord::new("Caption", None);
        assert_eq!(present.display_value(), "foo");
        assert_eq!(absent.display_value(), NOT_AVAILABLE);
    }

    #[test]
    fn test_property_record_serialization() {
        let record = PropertyRecord::new("Size", Some("10".into()));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Size","value":"10"}"#);
        let absent: PropertyRecord = serde_json::from_str(r#"{"name":"X","value":null}"#).unwrap();
        assert!(absent.value.is_none());
    }
}
