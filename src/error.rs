// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 nervosys

//! Error types for WMI Explorer

use std::io;
use thiserror::Error;

/// Result type alias for explorer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for WMI Explorer
#[derive(Error, Debug)]
pub enum Error {
    /// Namespace unreachable or inaccessible
    #[error("Connection error in '{namespace}': {message}")]
    Connection { namespace: String, message: String },

    /// Class, instance or property enumeration failed
    #[error("Query error ({context}): {message}")]
    Query { context: String, message: String },

    /// I/O error (report output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

impl Error {
    pub fn connection(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Connection {
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    pub fn query(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Query {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Bare failure message, without the variant prefix.
    ///
    /// Report lines and error dialogs already carry their own context
    /// (`Error in namespace '...'`), so they want only the provider text.
    pub fn message(&self) -> String {
        match self {
            Error::Connection { message, .. } | Error::Query { message, .. } => message.clone(),
            Error::Config(s) | Error::UnsupportedPlatform(s) => s.clone(),
            Error::Io(e) => e.to_string(),
            Error::Json(e) => e.to_string(),
        }
    }
}
