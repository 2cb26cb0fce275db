// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! # WMI Explorer
//!
//! Two front-ends over the Windows Management Instrumentation (WMI) API:
//!
//! - a console **namespace walker** that recursively visits every namespace
//!   under a starting point, prints every instance property of every class
//!   not matched by an exclusion list, and reports per-class line counts and
//!   timings;
//! - an interactive **browser** (desktop GUI via egui, terminal UI via
//!   ratatui) with namespace, class, and property panes.
//!
//! Both are written against the [`Provider`] trait. [`provider::WmiProvider`]
//! talks to WMI on Windows; [`provider::mock::MockProvider`] serves an
//! in-memory tree on any platform.
//!
//! ## Example
//!
//! ```
//! use wmixlib::{walk, ExclusionSet, NamespacePath, TextReport};
//! use wmixlib::provider::mock::MockProvider;
//!
//! let mut provider = MockProvider::new();
//! provider
//!     .namespace("root\\TestNS")
//!     .class("Widget")
//!     .instance(&[("Name", "foo"), ("Size", "10")]);
//!
//! let mut report = TextReport::new(Vec::new());
//! let outcome = walk(&provider, &NamespacePath::root(), ExclusionSet::default(), &mut report)?;
//! assert_eq!(outcome.property_lines, 2);
//! # Ok::<(), wmixlib::Error>(())
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod namespace;
pub mod provider;
pub mod report;
pub mod walker;

#[cfg(feature = "gui")]
pub mod gui;

#[cfg(feature = "cli")]
pub mod tui;

pub use browser::{BrowseError, Browser};
pub use config::{ExplorerConfig, OutputFormat};
pub use error::{Error, Result};
pub use exclusion::{ExclusionSet, DEFAULT_EXCLUSIONS};
pub use namespace::{ClassDescriptor, NamespacePath};
pub use provider::{PropertyRecord, Provider};
pub use report::{JsonReport, TextReport};
pub use walker::{walk, RecordSink, WalkEvent, WalkOptions, WalkOutcome, Walker};
