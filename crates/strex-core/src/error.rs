// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the strex plugin framework.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across the registry, matcher and loaders.
#[derive(Debug, Error)]
pub enum StrexError {
    /// Input to URL resolution is not a usable URL.
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A plugin name collides with a registered or removed plugin.
    #[error("{}", duplicate_message(name, *removed))]
    DuplicateName { name: String, removed: bool },

    /// A required plugin argument was not given on the command line.
    #[error("plugin `{plugin}` requires `--{flag}`")]
    MissingArgument { plugin: String, flag: String },

    /// A startup resource (docs matrix, removed list, test directory) could not be read.
    #[error("cannot read `{}`: {source}", path.display())]
    MissingFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A plugin manifest is malformed.
    #[error("plugin manifest error: {0}")]
    Manifest(String),

    /// The documentation plugin matrix does not have the expected layout.
    #[error("malformed plugin matrix `{}`: {reason}", path.display())]
    MalformedMatrix { path: PathBuf, reason: String },

    /// Report output could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

fn duplicate_message(name: &str, removed: bool) -> String {
    if removed {
        format!("plugin `{name}` is in the removed plugins list")
    } else {
        format!("plugin `{name}` is already registered")
    }
}

impl StrexError {
    /// Build a `MissingFile` error for `path`.
    pub fn missing_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MissingFile {
            path: path.into(),
            source,
        }
    }
}
