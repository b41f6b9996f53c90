// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, the meta checks and the CLI.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Returns true if `name` is usable as a plugin name.
///
/// Plugin names are word characters only (`[A-Za-z0-9_]`, plus Unicode
/// letters and digits), which is also what the documentation matrix parser
/// recognizes at the start of a table row.
pub fn is_valid_plugin_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Identifies one of the catalog consistency checks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Every non-built-in plugin is listed in the documentation matrix.
    PluginHasDocs,
    /// Every documented plugin exists.
    DocsHasPlugin,
    /// Every non-built-in plugin has a test file.
    PluginHasTests,
    /// Every test file belongs to an existing plugin.
    TestedHasPlugin,
    /// No registered plugin appears in the removed list.
    NoRemovedPluginRegistered,
    /// Every global plugin argument refers to a real CLI argument.
    GlobalArgsValid,
}

impl CheckKind {
    /// Short human-readable title used in reports.
    pub fn title(self) -> &'static str {
        match self {
            CheckKind::PluginHasDocs => "Plugin docs",
            CheckKind::DocsHasPlugin => "Docs entries",
            CheckKind::PluginHasTests => "Plugin tests",
            CheckKind::TestedHasPlugin => "Test files",
            CheckKind::NoRemovedPluginRegistered => "Removed list",
            CheckKind::GlobalArgsValid => "Global arguments",
        }
    }
}
