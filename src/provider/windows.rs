// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Windows provider backed by WMI
//!
//! This module talks to the WMI service through the `wmi` crate:
//! - `meta_class` for class enumeration (`__CLASS` system property)
//! - `__NAMESPACE` for child namespace discovery
//! - shallow `SELECT * FROM <class> WHERE __CLASS = '<class>'` for instances
//! - object-path lookup of the class itself for schema-level properties
//!
//! The query text lives in [`super::wql`].

use serde::Deserialize;
use std::collections::BTreeMap;
use wmi::{COMLibrary, Variant, WMIConnection};

use super::{wql, PropertyRecord, Provider};
use crate::error::{Error, Result};
use crate::namespace::NamespacePath;

/// Raw instance as returned by WMI, keyed by property name.
/// WMI does not promise a property order, so rows are kept sorted by name.
pub type WmiInstance = BTreeMap<String, Variant>;

#[derive(Deserialize, Debug)]
struct MetaClass {
    #[serde(rename = "__CLASS")]
    class: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct NamespaceEntry {
    name: String,
}

/// Initialize COM for the current thread.
/// Handles cases where COM is already initialized by the GUI framework
fn init_com() -> COMLibrary {
    // Strategy 1: Fresh COM initialization
    if let Ok(com) = COMLibrary::new() {
        return com;
    }

    // Strategy 2: COM without security init
    if let Ok(com) = COMLibrary::without_security() {
        return com;
    }

    // Strategy 3: Assume COM is already initialized by the runtime (e.g., GUI apps)
    log::debug!("COM already initialized on this thread; reusing it");
    unsafe { COMLibrary::assume_initialized() }
}

/// WMI-backed provider. COM is initialized once, on the thread that creates
/// the provider; all calls must stay on that thread.
pub struct WmiProvider {
    com: COMLibrary,
}

impl WmiProvider {
    /// Never fails: the last COM strategy reuses whatever the thread has
    pub fn new() -> Self {
        Self { com: init_com() }
    }
}

impl Default for WmiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for WmiProvider {
    type Handle = WMIConnection;
    type Instance = WmiInstance;

    fn connect(&self, path: &NamespacePath) -> Result<Self::Handle> {
        let namespace = path.to_string();
        WMIConnection::with_namespace_path(&namespace, self.com)
            .map_err(|e| Error::connection(namespace, e.to_string()))
    }

    fn list_classes(&self, handle: &Self::Handle) -> Result<Vec<String>> {
        let classes: Vec<MetaClass> = handle
            .raw_query(wql::CLASSES_QUERY)
            .map_err(|e| Error::query("meta_class", e.to_string()))?;
        Ok(classes.into_iter().map(|c| c.class).collect())
    }

    fn list_child_namespaces(&self, handle: &Self::Handle) -> Result<Vec<String>> {
        let entries: Vec<NamespaceEntry> = handle
            .raw_query(wql::NAMESPACES_QUERY)
            .map_err(|e| Error::query("__NAMESPACE", e.to_string()))?;
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    fn list_instances(&self, handle: &Self::Handle, class: &str) -> Result<Vec<Self::Instance>> {
        handle
            .raw_query(wql::instances_query(class))
            .map_err(|e| Error::query(class, e.to_string()))
    }

    fn instance_properties(
        &self,
        _handle: &Self::Handle,
        instance: &Self::Instance,
    ) -> Result<Vec<PropertyRecord>> {
        Ok(to_records(instance))
    }

    fn class_properties(&self, handle: &Self::Handle, class: &str) -> Result<Vec<PropertyRecord>> {
        let definition: WmiInstance = handle
            .get_raw_by_path(wql::class_path(class))
            .map_err(|e| Error::query(class, e.to_string()))?;
        Ok(to_records(&definition))
    }
}

/// Property records in name order. Provider order does not survive
/// deserialization into a map.
fn to_records(instance: &WmiInstance) -> Vec<PropertyRecord> {
    instance
        .iter()
        .map(|(name, value)| PropertyRecord::new(name.clone(), render_variant(value)))
        .collect()
}

/// Render a WMI value as text. Null and empty values are absent.
pub fn render_variant(value: &Variant) -> Option<String> {
    match value {
        Variant::Empty | Variant::Null => None,
        Variant::String(s) => Some(s.clone()),
        Variant::Bool(b) => Some(b.to_string()),
        Variant::I1(v) => Some(v.to_string()),
        Variant::I2(v) => Some(v.to_string()),
        Variant::I4(v) => Some(v.to_string()),
        Variant::I8(v) => Some(v.to_string()),
        Variant::UI1(v) => Some(v.to_string()),
        Variant::UI2(v) => Some(v.to_string()),
        Variant::UI4(v) => Some(v.to_string()),
        Variant::UI8(v) => Some(v.to_string()),
        Variant::R4(v) => Some(v.to_string()),
        Variant::R8(v) => Some(v.to_string()),
        Variant::Array(items) => Some(
            items
                .iter()
                .map(|v| render_variant(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(format!("{:?}", other)),
    }
}
