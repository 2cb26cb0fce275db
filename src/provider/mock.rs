// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! In-memory provider for testing
//!
//! Serves a configurable namespace tree and records every call made against
//! it, so walker and browser behavior can be checked deterministically and
//! without Windows. Failures can be injected at each call site.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{PropertyRecord, Provider};
use crate::error::{Error, Result};
use crate::namespace::NamespacePath;

/// One instance served by the mock
#[derive(Debug, Clone, Default)]
pub struct MockInstance {
    pub properties: Vec<PropertyRecord>,
    /// Reading this instance's properties fails with this message
    pub error: Option<String>,
}

/// One class served by the mock
#[derive(Debug, Clone, Default)]
pub struct MockClass {
    pub name: String,
    pub instances: Vec<MockInstance>,
    /// Schema-level properties returned by `class_properties`
    pub schema: Vec<PropertyRecord>,
    pub instances_error: Option<String>,
    pub schema_error: Option<String>,
}

impl MockClass {
    /// Add an instance whose properties all have values
    pub fn instance(&mut self, properties: &[(&str, &str)]) -> &mut Self {
        let properties = properties
            .iter()
            .map(|(n, v)| PropertyRecord::new(*n, Some(v.to_string())))
            .collect();
        self.instances.push(MockInstance {
            properties,
            error: None,
        });
        self
    }

    pub fn instance_records(&mut self, properties: Vec<PropertyRecord>) -> &mut Self {
        self.instances.push(MockInstance {
            properties,
            error: None,
        });
        self
    }

    /// Add an instance whose property read fails
    pub fn failing_instance(&mut self, message: &str) -> &mut Self {
        self.instances.push(MockInstance {
            properties: Vec::new(),
            error: Some(message.to_string()),
        });
        self
    }

    pub fn fail_instances(&mut self, message: &str) -> &mut Self {
        self.instances_error = Some(message.to_string());
        self
    }

    /// Add a schema-level property
    pub fn property(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.schema
            .push(PropertyRecord::new(name, value.map(String::from)));
        self
    }

    pub fn fail_schema(&mut self, message: &str) -> &mut Self {
        self.schema_error = Some(message.to_string());
        self
    }
}

/// One namespace served by the mock
#[derive(Debug, Clone, Default)]
pub struct MockNamespace {
    pub classes: Vec<MockClass>,
    pub children: Vec<String>,
    pub connect_error: Option<String>,
    pub classes_error: Option<String>,
    pub children_error: Option<String>,
}

impl MockNamespace {
    /// Get or create a class in this namespace
    pub fn class(&mut self, name: &str) -> &mut MockClass {
        let idx = match self.classes.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.classes.push(MockClass {
                    name: name.to_string(),
                    ..Default::default()
                });
                self.classes.len() - 1
            }
        };
        &mut self.classes[idx]
    }

    pub fn fail_connect(&mut self, message: &str) -> &mut Self {
        self.connect_error = Some(message.to_string());
        self
    }

    pub fn fail_classes(&mut self, message: &str) -> &mut Self {
        self.classes_error = Some(message.to_string());
        self
    }

    pub fn fail_children(&mut self, message: &str) -> &mut Self {
        self.children_error = Some(message.to_string());
        self
    }
}

/// A test-double provider over an in-memory namespace tree
#[derive(Debug, Default)]
pub struct MockProvider {
    namespaces: HashMap<NamespacePath, MockNamespace>,
    calls: RefCell<Vec<String>>,
}

impl MockProvider {
    /// A provider holding only an empty `root` namespace
    pub fn new() -> Self {
        let mut namespaces = HashMap::new();
        namespaces.insert(NamespacePath::root(), MockNamespace::default());
        Self {
            namespaces,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Get or create a namespace, registering it (and any missing
    /// ancestors) as a child of its parent. Unparseable paths map to `root`.
    pub fn namespace(&mut self, path: &str) -> &mut MockNamespace {
        let path = NamespacePath::parse(path).unwrap_or_default();
        let segments = path.segments().to_vec();
        let mut current = NamespacePath::parse(&segments[0]).unwrap_or_default();
        self.namespaces.entry(current.clone()).or_default();
        for segment in &segments[1..] {
            let child = current.child(segment);
            if !self.namespaces.contains_key(&child) {
                self.namespaces.insert(child.clone(), MockNamespace::default());
                if let Some(parent) = self.namespaces.get_mut(&current) {
                    parent.children.push(segment.clone());
                }
            }
            current = child;
        }
        self.namespaces.entry(path).or_default()
    }

    /// Every call made so far, e.g. `connect root\cimv2`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn lookup(&self, path: &NamespacePath) -> Result<&MockNamespace> {
        self.namespaces
            .get(path)
            .ok_or_else(|| Error::connection(path.to_string(), "Invalid namespace"))
    }

    fn lookup_class(&self, path: &NamespacePath, class: &str) -> Result<&MockClass> {
        self.lookup(path)?
            .classes
            .iter()
            .find(|c| c.name == class)
            .ok_or_else(|| Error::query(format!("{}:{}", path, class), "Invalid class"))
    }

    /// A small tree resembling a real machine, for `--demo` runs
    pub fn demo() -> Self {
        let mut provider = Self::new();
        {
            let cimv2 = provider.namespace("root\\cimv2");
            cimv2
                .class("Win32_BIOS")
                .instance(&[
                    ("Manufacturer", "American Megatrends Inc."),
                    ("SMBIOSBIOSVersion", "1.21.0"),
                    ("SerialNumber", "DEMO-0001"),
                ])
                .property("Manufacturer", None)
                .property("SMBIOSBIOSVersion", None);
            cimv2
                .class("Win32_OperatingSystem")
                .instance(&[
                    ("Caption", "Microsoft Windows 11 Pro"),
                    ("OSArchitecture", "64-bit"),
                    ("Version", "10.0.22631"),
                ])
                .property("Caption", None)
                .property("Version", None);
            cimv2
                .class("Win32_PnPEntity")
                .instance(&[("Name", "PCI Express Root Port")]);
            cimv2
                .class("Win32_Fan")
                .fail_instances("Not supported");
        }
        provider
            .namespace("root\\cimv2\\mdm")
            .class("MDM_DevDetail_Ext01")
            .instance_records(vec![
                PropertyRecord::new("DeviceHardwareData", None),
                PropertyRecord::new("InstanceID", Some("Ext".into())),
            ]);
        provider
            .namespace("root\\WMI")
            .class("MSAcpi_ThermalZoneTemperature")
            .instance(&[("CurrentTemperature", "3010"), ("InstanceName", "ACPI\\ThermalZone\\TZ00_0")]);
        provider
            .namespace("root\\SecurityCenter")
            .fail_connect("Access denied");
        provider
    }

    /// A uniform tree for benchmarks: `fanout` children per namespace down
    /// to `depth`, each namespace holding `classes` classes of `instances`
    /// instances with `properties` properties each.
    pub fn synthetic(
        depth: usize,
        fanout: usize,
        classes: usize,
        instances: usize,
        properties: usize,
    ) -> Self {
        let mut provider = Self::new();
        let mut level = vec![NamespacePath::root()];
        for d in 0..=depth {
            let mut next = Vec::new();
            for path in &level {
                let ns = provider.namespace(&path.to_string());
                for c in 0..classes {
                    let class = ns.class(&format!("Bench_Class{}", c));
                    for _ in 0..instances {
                        let records = (0..properties)
                            .map(|p| PropertyRecord::new(format!("Prop{}", p), Some(p.to_string())))
                            .collect();
                        class.instance_records(records);
                    }
                }
                if d < depth {
                    for f in 0..fanout {
                        next.push(path.child(&format!("ns{}", f)));
                    }
                }
            }
            level = next;
        }
        provider
    }
}

impl Provider for MockProvider {
    type Handle = NamespacePath;
    type Instance = MockInstance;

    fn connect(&self, path: &NamespacePath) -> Result<Self::Handle> {
        self.log(format!("connect {}", path));
        let ns = self.lookup(path)?;
        if let Some(ref message) = ns.connect_error {
            return Err(Error::connection(path.to_string(), message.clone()));
        }
        Ok(path.clone())
    }

    fn list_classes(&self, handle: &Self::Handle) -> Result<Vec<String>> {
        self.log(format!("classes {}", handle));
        let ns = self.lookup(handle)?;
        if let Some(ref message) = ns.classes_error {
            return Err(Error::query(handle.to_string(), message.clone()));
        }
        Ok(ns.classes.iter().map(|c| c.name.clone()).collect())
    }

    fn list_child_namespaces(&self, handle: &Self::Handle) -> Result<Vec<String>> {
        self.log(format!("children {}", handle));
        let ns = self.lookup(handle)?;
        if let Some(ref message) = ns.children_error {
            return Err(Error::query(handle.to_string(), message.clone()));
        }
        Ok(ns.children.clone())
    }

    fn list_instances(&self, handle: &Self::Handle, class: &str) -> Result<Vec<Self::Instance>> {
        self.log(format!("instances {}:{}", handle, class));
        let mock = self.lookup_class(handle, class)?;
        if let Some(ref message) = mock.instances_error {
            return Err(Error::query(class, message.clone()));
        }
        Ok(mock.instances.clone())
    }

    fn instance_properties(
        &self,
        handle: &Self::Handle,
        instance: &Self::Instance,
    ) -> Result<Vec<PropertyRecord>> {
        self.log(format!("properties {}", handle));
        match instance.error {
            Some(ref message) => Err(Error::query(handle.to_string(), message.clone())),
            None => Ok(instance.properties.clone()),
        }
    }

    fn class_properties(&self, handle: &Self::Handle, class: &str) -> Result<Vec<PropertyRecord>> {
        self.log(format!("schema {}:{}", handle, class));
        let mock = self.lookup_class(handle, class)?;
        if let Some(ref message) = mock.schema_error {
            return Err(Error::query(class, message.clone()));
        }
        Ok(mock.schema.clone())
    }
}
