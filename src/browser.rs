// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Interactive browse state shared by the GUI and TUI
//!
//! Unlike the walker, browsing goes one level per user action: selecting a
//! namespace lists its classes (no instances, no exclusion filtering);
//! selecting a class fetches its schema-level properties once. Every
//! selection clears what it replaces before the new list is populated, so a
//! failed query leaves empty panes rather than stale ones.

use thiserror::Error;

use crate::error::Error;
use crate::namespace::NamespacePath;
use crate::provider::{PropertyRecord, Provider};

/// A failure to show to the user, with the text of the error dialog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BrowseError {
    pub message: String,
}

impl BrowseError {
    /// Dialog title used for every browse failure
    pub const TITLE: &'static str = "Error";

    fn new(context: String, error: &Error) -> Self {
        Self {
            message: format!("{}: {}", context, error.message()),
        }
    }
}

/// Three-level selection state: namespace, class, properties
pub struct Browser<P: Provider> {
    provider: P,
    root: NamespacePath,
    namespaces: Vec<String>,
    selected_namespace: Option<String>,
    classes: Vec<String>,
    selected_class: Option<String>,
    properties: Vec<PropertyRecord>,
}

impl<P: Provider> Browser<P> {
    /// Browser over the children of `root`
    pub fn new(provider: P) -> Self {
        Self::with_root(provider, NamespacePath::root())
    }

    pub fn with_root(provider: P, root: NamespacePath) -> Self {
        Self {
            provider,
            root,
            namespaces: Vec::new(),
            selected_namespace: None,
            classes: Vec::new(),
            selected_class: None,
            properties: Vec::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn root(&self) -> &NamespacePath {
        &self.root
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn properties(&self) -> &[PropertyRecord] {
        &self.properties
    }

    pub fn selected_namespace(&self) -> Option<&str> {
        self.selected_namespace.as_deref()
    }

    pub fn selected_class(&self) -> Option<&str> {
        self.selected_class.as_deref()
    }

    /// Full path of a namespace entry (`root\<name>`)
    pub fn namespace_path(&self, name: &str) -> NamespacePath {
        self.root.child(name)
    }

    /// (Re)load the namespace list, resetting every selection
    pub fn load_namespaces(&mut self) -> Result<(), BrowseError> {
        self.namespaces.clear();
        self.clear_namespace_selection();

        let listed = self
            .provider
            .connect(&self.root)
            .and_then(|handle| self.provider.list_child_namespaces(&handle));
        match listed {
            Ok(names) => {
                log::debug!("Loaded {} namespaces under {}", names.len(), self.root);
                self.namespaces = names;
                Ok(())
            }
            Err(e) => {
                log::warn!("Cannot list namespaces under {}: {}", self.root, e);
                Err(BrowseError::new("Error retrieving namespaces".into(), &e))
            }
        }
    }

    /// Select a namespace and list its classes
    pub fn select_namespace(&mut self, name: &str) -> Result<(), BrowseError> {
        self.clear_namespace_selection();
        if name.is_empty() {
            return Ok(());
        }
        self.selected_namespace = Some(name.to_string());

        let path = self.namespace_path(name);
        let listed = self
            .provider
            .connect(&path)
            .and_then(|handle| self.provider.list_classes(&handle));
        match listed {
            Ok(classes) => {
                log::debug!("Loaded {} classes from {}", classes.len(), path);
                self.classes = classes;
                Ok(())
            }
            Err(e) => {
                log::warn!("Cannot list classes in {}: {}", path, e);
                Err(BrowseError::new(
                    format!("Error loading classes for namespace {}", name),
                    &e,
                ))
            }
        }
    }

    /// Select a class of the current namespace and fetch its properties
    pub fn select_class(&mut self, name: &str) -> Result<(), BrowseError> {
        self.properties.clear();
        self.selected_class = None;
        let namespace = match self.selected_namespace.as_deref() {
            Some(ns) if !name.is_empty() => ns.to_string(),
            _ => return Ok(()),
        };
        self.selected_class = Some(name.to_string());

        let path = self.namespace_path(&namespace);
        let fetched = self
            .provider
            .connect(&path)
            .and_then(|handle| self.provider.class_properties(&handle, name));
        match fetched {
            Ok(properties) => {
                self.properties = properties;
                Ok(())
            }
            Err(e) => {
                log::warn!("Cannot fetch properties of {}:{}: {}", path, name, e);
                Err(BrowseError::new(
                    "An error occurred while fetching class properties".into(),
                    &e,
                ))
            }
        }
    }

    fn clear_namespace_selection(&mut self) {
        self.selected_namespace = None;
        self.classes.clear();
        self.selected_class = None;
        self.properties.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;

    fn provider() -> MockProvider {
        let mut provider = MockProvider::new();
        {
            let n = provider.namespace("root\\N");
            n.class("Alpha").property("Name", Some("alpha"));
            n.class("Beta").property("Size", None);
        }
        provider.namespace("root\\M").class("Gamma");
        provider.namespace("root\\Locked").fail_connect("Access denied");
        provider
    }

    #[test]
    fn test_load_namespaces() {
        let mut browser = Browser::new(provider());
        browser.load_namespaces().unwrap();
        assert_eq!(browser.namespaces(), ["N", "M", "Locked"]);
        assert!(browser.classes().is_empty());
    }

    #[test]
    fn test_select_namespace_lists_classes_unfiltered() {
        let mut provider = provider();
        provider.namespace("root\\N").class("Win32_PnPEntity");
        let mut browser = Browser::new(provider);
        browser.select_namespace("N").unwrap();
        assert_eq!(browser.classes(), ["Alpha", "Beta", "Win32_PnPEntity"]);
        assert_eq!(browser.selected_namespace(), Some("N"));
        // Listing classes never touches instances
        assert!(!browser
            .provider()
            .calls()
            .iter()
            .any(|c| c.starts_with("instances")));
    }

    #[test]
    fn test_switching_namespace_replaces_classes_and_clears_properties() {
        let mut browser = Browser::new(provider());
        browser.select_namespace("N").unwrap();
        browser.select_class("Alpha").unwrap();
        assert_eq!(browser.properties().len(), 1);

        browser.select_namespace("M").unwrap();
        assert_eq!(browser.classes(), ["Gamma"]);
        assert!(browser.properties().is_empty());
        assert_eq!(browser.selected_class(), None);
    }

    #[test]
    fn test_select_class_fetches_schema() {
        let mut browser = Browser::new(provider());
        browser.select_namespace("N").unwrap();
        browser.select_class("Beta").unwrap();
        assert_eq!(browser.properties()[0].name, "Size");
        assert_eq!(browser.properties()[0].display_value(), "N/A");
        assert!(browser
            .provider()
            .calls()
            .contains(&"schema root\\N:Beta".to_string()));
    }

    #[test]
    fn test_select_class_without_namespace_is_noop() {
        let mut browser = Browser::new(provider());
        browser.select_class("Alpha").unwrap();
        assert!(browser.properties().is_empty());
        assert!(browser.provider().calls().is_empty());
    }

    #[test]
    fn test_failed_namespace_leaves_empty_classes() {
        let mut browser = Browser::new(provider());
        browser.select_namespace("N").unwrap();
        let err = browser.select_namespace("Locked").unwrap_err();
        assert_eq!(
            err.message,
            "Error loading classes for namespace Locked: Access denied"
        );
        assert!(browser.classes().is_empty());
        assert_eq!(BrowseError::TITLE, "Error");
    }

    #[test]
    fn test_failed_class_fetch() {
        let mut provider = provider();
        provider.namespace("root\\N").class("Alpha").fail_schema("Invalid class");
        let mut browser = Browser::new(provider);
        browser.select_namespace("N").unwrap();
        let err = browser.select_class("Alpha").unwrap_err();
        assert_eq!(
            err.to_string(),
            "An error occurred while fetching class properties: Invalid class"
        );
        assert!(browser.properties().is_empty());
    }

    #[test]
    fn test_failed_namespace_listing() {
        let mut provider = MockProvider::new();
        provider.namespace("root").fail_children("RPC server unavailable");
        let mut browser = Browser::new(provider);
        let err = browser.load_namespaces().unwrap_err();
        assert_eq!(
            err.message,
            "Error retrieving namespaces: RPC server unavailable"
        );
        assert!(browser.namespaces().is_empty());
    }

    #[test]
    fn test_empty_selection_clears() {
        let mut browser = Browser::new(provider());
        browser.select_namespace("N").unwrap();
        browser.select_namespace("").unwrap();
        assert!(browser.classes().is_empty());
        assert_eq!(browser.selected_namespace(), None);
    }
}
