// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Class exclusion filter for the namespace walker
//!
//! A class is skipped when its name contains any entry of the set as a
//! substring. Matching is case-sensitive and partial: `PnPEntity` excludes
//! `Win32_PnPEntity`, and the short entry `PnP` excludes every class with
//! `PnP` anywhere in its name.

use serde::{Deserialize, Serialize};

/// Classes skipped by the console walk unless overridden by configuration.
///
/// These are the classes whose instance enumeration is either huge
/// (files, directories, processes, event logs) or slow enough to stall a
/// full-tree walk.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "SecuritySettingOfLogicalFile",
    "COMApplicationSettings",
    "SystemProgramGroups",
    "PnPEntity",
    "LogicalDisk",
    "CacheMemory",
    "Volume",
    "Process",
    "SoftwareElement",
    "DataFile",
    "Directory",
    "ClassicCOMClassSettings",
    "ShortcutFile",
    "ShortcutAction",
    "SubDirectory",
    "ProgramGroupContents",
    "SoftwareFeatureSoftwareElements",
    "rectoryContainsFile",
    "ClassicCOMApplicationClasses",
    "VolumeQuota",
    "VolumeQuotaSetting",
    "CDROMDrive",
    "StorageVolume",
    "PnPSignedDriver",
    "Service",
    "SystemDriver",
    "Thread",
    "DCOMApplication",
    "SoftwareFeature",
    "ClassicCOMClass",
    "DeviceMemoryAddress",
    "IRQResource",
    "PhysicalMedia",
    "QuotaSetting",
    "Property",
    "Binary",
    "PNPAllocatedResource",
    "ClassicCOMClassSetting",
    "DiskDrivePhysicalMedia",
    "AllocatedResource",
    "PnPDevice",
    "NetworkAdapterSetting",
    "SecuritySettingOfLogicalShare",
    "SystemDevices",
    "VideoSettings",
    "ProcessExecutable",
    "NTLogEvent",
    "RegistryAction",
    "ProductResource",
    "ActionCheck",
    "ImplementedCategory",
    "InstalledSoftwareElement",
    "FileSpecification",
    "ReliabilityRecords",
    "DiskQuota",
    "EventLog",
    "PnP",
    "Networking",
    "Printer",
    "SerialPort",
    "CreateFolderAction",
    "CheckCheck",
    "MpThreatCatalog",
];

/// Immutable set of substrings that exclude a class from the walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet {
    patterns: Vec<String>,
}

impl ExclusionSet {
    /// Build a set from patterns. Empty and duplicate entries are dropped;
    /// an empty pattern would otherwise match every class.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for p in patterns {
            let p = p.into();
            if !p.is_empty() && !out.contains(&p) {
                out.push(p);
            }
        }
        Self { patterns: out }
    }

    /// A set that excludes nothing
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Return a new set with additional patterns appended
    pub fn extended<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            self.patterns
                .iter()
                .cloned()
                .chain(extra.into_iter().map(Into::into)),
        )
    }

    /// True if any pattern occurs anywhere in `class_name`
    pub fn is_excluded(&self, class_name: &str) -> bool {
        self.matching_pattern(class_name).is_some()
    }

    /// First pattern that excludes `class_name`, if any
    pub fn matching_pattern(&self, class_name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| class_name.contains(p.as_str()))
            .map(String::as_str)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        let set = ExclusionSet::default();
        assert!(set.is_excluded("Win32_PnPEntity"));
        assert!(set.is_excluded("Win32_Process"));
        assert!(set.is_excluded("CIM_DataFile"));
        // Several entries match; the first one in list order is reported
        assert_eq!(
            set.matching_pattern("CIM_DirectoryContainsFile"),
            Some("Directory")
        );
    }

    #[test]
    fn test_retained_classes() {
        let set = ExclusionSet::default();
        assert!(!set.is_excluded("Win32_BIOS"));
        assert!(!set.is_excluded("Win32_OperatingSystem"));
        assert!(!set.is_excluded("Widget"));
    }

    #[test]
    fn test_case_sensitive() {
        let set = ExclusionSet::new(["Printer"]);
        assert!(set.is_excluded("Win32_Printer"));
        assert!(!set.is_excluded("Win32_printer"));
    }

    #[test]
    fn test_excluded_iff_some_pattern_is_substring() {
        let set = ExclusionSet::new(["ab", "xyz"]);
        for name in ["ab", "cab", "abc", "xyz_1", "a_b", "xy", "", "zyx"] {
            let expected = set.patterns().iter().any(|p| name.contains(p.as_str()));
            assert_eq!(set.is_excluded(name), expected, "class {:?}", name);
        }
    }

    #[test]
    fn test_empty_and_duplicate_patterns_dropped() {
        let set = ExclusionSet::new(["", "Volume", "Volume"]);
        assert_eq!(set.len(), 1);
        assert!(!set.is_excluded("Win32_BIOS"));
    }

    #[test]
    fn test_default_has_no_duplicates() {
        let set = ExclusionSet::default();
        assert_eq!(set.len(), DEFAULT_EXCLUSIONS.len());
    }

    #[test]
    fn test_extended() {
        let base = ExclusionSet::new(["Volume"]);
        let set = base.extended(["Fan"]);
        assert!(set.is_excluded("Win32_Fan"));
        assert!(!base.is_excluded("Win32_Fan"));
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let set = ExclusionSet::empty();
        assert!(set.is_empty());
        assert!(!set.is_excluded("Win32_PnPEntity"));
    }
}
