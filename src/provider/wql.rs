// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! WQL text sent to the WMI service
//!
//! Kept free of any platform code so the exact queries are checked on every
//! host.

/// Every class defined in the connected namespace (`__CLASS` per row)
pub const CLASSES_QUERY: &str = "SELECT * FROM meta_class";

/// Immediate child namespaces of the connected namespace
pub const NAMESPACES_QUERY: &str = "SELECT Name FROM __NAMESPACE";

/// Instances of exactly `class`.
///
/// `SELECT * FROM <class>` alone is deep: it also returns every subclass
/// instance, so a retained superclass such as `CIM_LogicalFile` would pull in
/// `CIM_DataFile` rows the exclusion list skips. The `__CLASS` filter keeps
/// the enumeration shallow.
pub fn instances_query(class: &str) -> String {
    format!(
        "SELECT * FROM {} WHERE __CLASS = '{}'",
        class,
        escape_literal(class)
    )
}

/// Relative object path of a class definition
pub fn class_path(class: &str) -> String {
    class.to_string()
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
