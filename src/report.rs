// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Walk report sinks
//!
//! [`TextReport`] streams the human-readable console report as events
//! arrive. [`JsonReport`] buffers sections and writes a single JSON document
//! once the walk is over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::Result;
use crate::namespace::NamespacePath;
use crate::provider::PropertyRecord;
use crate::walker::{ClassSummary, RecordSink, WalkEvent, WalkOutcome};

const SEPARATOR_WIDTH: usize = 40;

/// Streaming plain-text report
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self, c: char) -> Result<()> {
        writeln!(self.out, "{}", c.to_string().repeat(SEPARATOR_WIDTH))?;
        Ok(())
    }
}

impl<W: Write> RecordSink for TextReport<W> {
    fn record(&mut self, event: WalkEvent<'_>) -> Result<()> {
        match event {
            WalkEvent::ClassStart { class } => {
                writeln!(self.out)?;
                writeln!(self.out)?;
                writeln!(self.out)?;
                self.rule('=')?;
                writeln!(self.out, "Class: {}", class)?;
                self.rule('=')?;
                writeln!(self.out, "Properties:")?;
            }
            WalkEvent::Property { record, .. } => {
                writeln!(self.out, "  {}: {}", record.name, record.display_value())?;
            }
            WalkEvent::InstanceEnd { .. } => writeln!(self.out)?,
            WalkEvent::ClassError { error, .. } => {
                writeln!(self.out, "  Error accessing instances: {}", error.message())?;
            }
            WalkEvent::ClassSummary { class, summary } => {
                self.rule('-')?;
                writeln!(
                    self.out,
                    "Lines printed for {} : {}",
                    class.name, summary.properties
                )?;
                writeln!(
                    self.out,
                    "Time Taken for {} : {:.4} ms",
                    class.name, summary.elapsed_ms
                )?;
            }
            WalkEvent::NamespaceError { path, error } => {
                writeln!(self.out, "Error in namespace '{}': {}", path, error.message())?;
            }
        }
        Ok(())
    }
}

/// One reported class in the JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSection {
    pub namespace: NamespacePath,
    pub class: String,
    pub instances: Vec<Vec<PropertyRecord>>,
    pub summary: ClassSummary,
    pub error: Option<String>,
}

/// A namespace-level failure in the JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceFailure {
    pub namespace: NamespacePath,
    pub message: String,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDocument {
    pub generated_at: DateTime<Utc>,
    pub start_namespace: NamespacePath,
    pub outcome: WalkOutcome,
    pub classes: Vec<ClassSection>,
    pub namespace_errors: Vec<NamespaceFailure>,
}

/// Buffering JSON report
#[derive(Debug, Default)]
pub struct JsonReport {
    classes: Vec<ClassSection>,
    namespace_errors: Vec<NamespaceFailure>,
    current: Option<ClassSection>,
    instance: Vec<PropertyRecord>,
}

impl JsonReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[ClassSection] {
        &self.classes
    }

    pub fn namespace_errors(&self) -> &[NamespaceFailure] {
        &self.namespace_errors
    }

    /// Assemble the final document
    pub fn into_document(self, start: &NamespacePath, outcome: WalkOutcome) -> JsonDocument {
        JsonDocument {
            generated_at: Utc::now(),
            start_namespace: start.clone(),
            outcome,
            classes: self.classes,
            namespace_errors: self.namespace_errors,
        }
    }

    /// Write the document as pretty-printed JSON
    pub fn finish<W: Write>(
        self,
        start: &NamespacePath,
        outcome: WalkOutcome,
        mut out: W,
    ) -> Result<()> {
        let document = self.into_document(start, outcome);
        serde_json::to_writer_pretty(&mut out, &document)?;
        writeln!(out)?;
        Ok(())
    }
}

impl RecordSink for JsonReport {
    fn record(&mut self, event: WalkEvent<'_>) -> Result<()> {
        match event {
            WalkEvent::ClassStart { class } => {
                self.instance.clear();
                self.current = Some(ClassSection {
                    namespace: class.namespace.clone(),
                    class: class.name.clone(),
                    instances: Vec::new(),
                    summary: ClassSummary::default(),
                    error: None,
                });
            }
            WalkEvent::Property { record, .. } => self.instance.push(record.clone()),
            WalkEvent::InstanceEnd { .. } => {
                let properties = std::mem::take(&mut self.instance);
                if let Some(section) = self.current.as_mut() {
                    section.instances.push(properties);
                }
            }
            WalkEvent::ClassError { error, .. } => {
                if let Some(section) = self.current.as_mut() {
                    section.error = Some(error.message());
                }
            }
            WalkEvent::ClassSummary { summary, .. } => {
                if let Some(mut section) = self.current.take() {
                    section.summary = summary.clone();
                    self.classes.push(section);
                }
            }
            WalkEvent::NamespaceError { path, error } => {
                self.namespace_errors.push(NamespaceFailure {
                    namespace: path.clone(),
                    message: error.message(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::ExclusionSet;
    use crate::provider::mock::MockProvider;
    use crate::walker::walk;

    fn text_report(provider: &MockProvider, exclusions: ExclusionSet) -> String {
        let mut report = TextReport::new(Vec::new());
        walk(provider, &NamespacePath::root(), exclusions, &mut report).unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn test_widget_scenario() {
        let mut provider = MockProvider::new();
        provider
            .namespace("root\\TestNS")
            .class("Widget")
            .instance(&[("Name", "foo"), ("Size", "10")]);

        let text = text_report(&provider, ExclusionSet::default());
        let lines: Vec<&str> = text.lines().collect();

        let header = lines
            .iter()
            .position(|l| *l == "Class: root\\TestNS:Widget")
            .expect("class header");
        assert_eq!(lines[header - 1], "=".repeat(40));
        assert_eq!(lines[header + 1], "=".repeat(40));
        assert_eq!(lines[header + 2], "Properties:");
        assert_eq!(lines[header + 3], "  Name: foo");
        assert_eq!(lines[header + 4], "  Size: 10");
        assert_eq!(lines[header + 5], "");
        assert_eq!(lines[header + 6], "-".repeat(40));
        assert_eq!(lines[header + 7], "Lines printed for Widget : 2");
        assert!(lines[header + 8].starts_with("Time Taken for Widget : "));
        assert!(lines[header + 8].ends_with(" ms"));
    }

    #[test]
    fn test_pnp_entity_never_reported() {
        let mut provider = MockProvider::new();
        provider
            .namespace("root\\cimv2")
            .class("Win32_PnPEntity")
            .instance(&[("Name", "USB Hub")]);

        let text = text_report(&provider, ExclusionSet::default());
        assert!(!text.contains("Win32_PnPEntity"));
        assert!(!text.contains("Class:"));
    }

    #[test]
    fn test_three_blank_lines_before_each_class() {
        let mut provider = MockProvider::new();
        provider.namespace("root").class("Empty");
        let text = text_report(&provider, ExclusionSet::empty());
        assert!(text.starts_with("\n\n\n========"));
    }

    #[test]
    fn test_absent_value_sentinel() {
        let mut provider = MockProvider::new();
        provider
            .namespace("root")
            .class("Thing")
            .instance_records(vec![PropertyRecord::new("Caption", None)]);
        let text = text_report(&provider, ExclusionSet::empty());
        assert!(text.contains("  Caption: N/A\n"));
    }

    #[test]
    fn test_error_lines() {
        let mut provider = MockProvider::new();
        provider.namespace("root\\locked").fail_connect("Access denied");
        provider
            .namespace("root")
            .class("Broken")
            .fail_instances("Not supported");

        let text = text_report(&provider, ExclusionSet::empty());
        assert!(text.contains("Properties:\n  Error accessing instances: Not supported\n----"));
        assert!(text.contains("Lines printed for Broken : 0\n"));
        assert!(text.contains("Error in namespace 'root\\locked': Access denied\n"));
    }

    #[test]
    fn test_blank_line_between_instances() {
        let mut provider = MockProvider::new();
        provider
            .namespace("root")
            .class("Pair")
            .instance(&[("Id", "1")])
            .instance(&[("Id", "2")]);
        let text = text_report(&provider, ExclusionSet::empty());
        assert!(text.contains("  Id: 1\n\n  Id: 2\n\n----"));
        assert!(text.contains("Lines printed for Pair : 2"));
    }

    #[test]
    fn test_json_report_sections() {
        let mut provider = MockProvider::new();
        provider
            .namespace("root\\TestNS")
            .class("Widget")
            .instance(&[("Name", "foo")])
            .instance(&[("Name", "bar")]);
        provider
            .namespace("root\\TestNS")
            .class("Broken")
            .fail_instances("Not supported");
        provider.namespace("root\\locked").fail_connect("Access denied");

        let mut report = JsonReport::new();
        let outcome = walk(
            &provider,
            &NamespacePath::root(),
            ExclusionSet::empty(),
            &mut report,
        )
        .unwrap();

        assert_eq!(report.classes().len(), 2);
        let widget = &report.classes()[0];
        assert_eq!(widget.class, "Widget");
        assert_eq!(widget.instances.len(), 2);
        assert_eq!(widget.summary.properties, 2);
        assert!(widget.error.is_none());
        assert_eq!(report.classes()[1].error.as_deref(), Some("Not supported"));
        assert_eq!(report.namespace_errors()[0].message, "Access denied");

        let mut out = Vec::new();
        report
            .finish(&NamespacePath::root(), outcome, &mut out)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["start_namespace"], "root");
        assert_eq!(value["classes"][0]["namespace"], "root\\TestNS");
        assert_eq!(value["classes"][0]["instances"][1][0]["value"], "bar");
        assert_eq!(value["outcome"]["namespaces_failed"], 1);
        assert!(value["generated_at"].is_string());
    }
}
