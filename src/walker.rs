// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Namespace walker
//!
//! Depth-first traversal of the namespace tree. At each namespace the walker
//! lists classes, drops the excluded ones, enumerates instances and
//! properties of the rest, then descends into child namespaces. Pending
//! namespaces live on an explicit stack, so tree depth never grows the call
//! stack.
//!
//! Provider failures never abort the walk. A namespace that cannot be
//! connected is reported once and its subtree is skipped; a class whose
//! instances cannot be read is reported once and still gets its summary.
//! Only sink failures (e.g. a closed stdout) end the walk early.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::exclusion::ExclusionSet;
use crate::namespace::{ClassDescriptor, NamespacePath};
use crate::provider::{PropertyRecord, Provider};

/// Per-class result of instance enumeration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Instances whose properties were read
    pub instances: usize,
    /// Property lines emitted for the class
    pub properties: usize,
    /// Wall-clock time spent enumerating instances, in milliseconds
    pub elapsed_ms: f64,
}

/// Something the walker reports to its sink
#[derive(Debug)]
pub enum WalkEvent<'a> {
    /// A retained class is about to be enumerated
    ClassStart { class: &'a ClassDescriptor },
    /// One property of the current instance
    Property {
        class: &'a ClassDescriptor,
        record: &'a PropertyRecord,
    },
    /// All properties of the current instance have been emitted
    InstanceEnd { class: &'a ClassDescriptor },
    /// Instance or property enumeration failed for the class
    ClassError {
        class: &'a ClassDescriptor,
        error: &'a Error,
    },
    /// Always emitted after a `ClassStart`, failed or not
    ClassSummary {
        class: &'a ClassDescriptor,
        summary: &'a ClassSummary,
    },
    /// Connecting to or listing a namespace failed
    NamespaceError {
        path: &'a NamespacePath,
        error: &'a Error,
    },
}

/// Consumer of walk events
pub trait RecordSink {
    fn record(&mut self, event: WalkEvent<'_>) -> Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn record(&mut self, event: WalkEvent<'_>) -> Result<()> {
        (**self).record(event)
    }
}

/// Totals for a whole walk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalkOutcome {
    pub namespaces_visited: usize,
    /// Namespaces that could not be connected (subtree skipped)
    pub namespaces_failed: usize,
    /// Class or child listing failures on connected namespaces
    pub namespace_errors: usize,
    pub classes_reported: usize,
    pub classes_excluded: usize,
    pub class_errors: usize,
    pub property_lines: usize,
    pub elapsed_ms: f64,
}

/// Walk tuning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Levels to descend below the start namespace; `None` is unbounded
    pub max_depth: Option<usize>,
}

/// Depth-first namespace walker over a provider
pub struct Walker<P: Provider> {
    provider: P,
    exclusions: ExclusionSet,
    options: WalkOptions,
}

impl<P: Provider> Walker<P> {
    pub fn new(provider: P, exclusions: ExclusionSet) -> Self {
        Self {
            provider,
            exclusions,
            options: WalkOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Walk `start` and everything below it
    pub fn walk<S: RecordSink + ?Sized>(
        &self,
        start: &NamespacePath,
        sink: &mut S,
    ) -> Result<WalkOutcome> {
        let started = Instant::now();
        let mut outcome = WalkOutcome::default();
        let mut pending = vec![start.clone()];

        while let Some(path) = pending.pop() {
            outcome.namespaces_visited += 1;
            log::debug!("Visiting namespace {}", path);

            let handle = match self.provider.connect(&path) {
                Ok(handle) => handle,
                Err(e) => {
                    log::warn!("Cannot connect to {}: {}", path, e);
                    outcome.namespaces_failed += 1;
                    sink.record(WalkEvent::NamespaceError {
                        path: &path,
                        error: &e,
                    })?;
                    continue;
                }
            };

            match self.provider.list_classes(&handle) {
                Ok(classes) => {
                    for name in classes {
                        let class = ClassDescriptor::new(path.clone(), name);
                        self.visit_class(&handle, &class, sink, &mut outcome)?;
                    }
                }
                Err(e) => {
                    log::warn!("Cannot list classes in {}: {}", path, e);
                    outcome.namespace_errors += 1;
                    sink.record(WalkEvent::NamespaceError {
                        path: &path,
                        error: &e,
                    })?;
                }
            }

            let depth = path.depth().saturating_sub(start.depth());
            if self.options.max_depth.map_or(false, |max| depth >= max) {
                continue;
            }

            match self.provider.list_child_namespaces(&handle) {
                // Reversed so the first child is popped first
                Ok(children) => pending.extend(children.iter().rev().map(|c| path.child(c))),
                Err(e) => {
                    log::warn!("Cannot list child namespaces of {}: {}", path, e);
                    outcome.namespace_errors += 1;
                    sink.record(WalkEvent::NamespaceError {
                        path: &path,
                        error: &e,
                    })?;
                }
            }
        }

        outcome.elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        log::info!(
            "Walk of {} finished: {} namespaces ({} failed), {} classes, {} excluded, {} lines",
            start,
            outcome.namespaces_visited,
            outcome.namespaces_failed,
            outcome.classes_reported,
            outcome.classes_excluded,
            outcome.property_lines
        );
        Ok(outcome)
    }

    fn visit_class<S: RecordSink + ?Sized>(
        &self,
        handle: &P::Handle,
        class: &ClassDescriptor,
        sink: &mut S,
        outcome: &mut WalkOutcome,
    ) -> Result<()> {
        if let Some(pattern) = self.exclusions.matching_pattern(&class.name) {
            log::debug!("Skipping {} (matches '{}')", class, pattern);
            outcome.classes_excluded += 1;
            return Ok(());
        }

        sink.record(WalkEvent::ClassStart { class })?;
        let started = Instant::now();
        let mut summary = ClassSummary::default();
        let mut failure = None;

        match self.provider.list_instances(handle, &class.name) {
            Ok(instances) => {
                for instance in &instances {
                    let records = match self.provider.instance_properties(handle, instance) {
                        Ok(records) => records,
                        Err(e) => {
                            failure = Some(e);
                            break;
                        }
                    };
                    for record in &records {
                        sink.record(WalkEvent::Property { class, record })?;
                        summary.properties += 1;
                    }
                    sink.record(WalkEvent::InstanceEnd { class })?;
                    summary.instances += 1;
                }
            }
            Err(e) => failure = Some(e),
        }

        summary.elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        if let Some(ref error) = failure {
            log::warn!("Cannot enumerate instances of {}: {}", class, error);
            outcome.class_errors += 1;
            sink.record(WalkEvent::ClassError { class, error })?;
        }

        outcome.classes_reported += 1;
        outcome.property_lines += summary.properties;
        sink.record(WalkEvent::ClassSummary {
            class,
            summary: &summary,
        })
    }
}

/// Walk `path` with `provider`, skipping classes matched by `exclusions`
pub fn walk<P: Provider, S: RecordSink + ?Sized>(
    provider: P,
    path: &NamespacePath,
    exclusions: ExclusionSet,
    sink: &mut S,
) -> Result<WalkOutcome> {
    Walker::new(provider, exclusions).walk(path, sink)
}
