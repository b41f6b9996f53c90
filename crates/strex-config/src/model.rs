// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for strex.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level strex configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StrexConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Plugin manifest discovery settings.
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Inputs of the catalog consistency checks.
    #[serde(default)]
    pub meta: MetaConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Plugin manifest discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Directory holding one `<name>.toml` manifest per plugin.
    #[serde(default = "default_plugins_dir")]
    pub dir: String,

    /// File name of the removed-plugins list inside `dir`.
    #[serde(default = "default_removed_file")]
    pub removed_file: String,

    /// Register the built-in protocol plugins (http, hls, dash, stream).
    #[serde(default = "default_builtins")]
    pub builtins: bool,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            dir: default_plugins_dir(),
            removed_file: default_removed_file(),
            builtins: default_builtins(),
        }
    }
}

impl PluginsConfig {
    /// Full path of the removed-plugins list.
    pub fn removed_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.removed_file)
    }
}

fn default_plugins_dir() -> String {
    "plugins".to_string()
}

fn default_removed_file() -> String {
    ".removed".to_string()
}

fn default_builtins() -> bool {
    true
}

/// Catalog consistency check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetaConfig {
    /// Path of the reStructuredText plugin matrix.
    #[serde(default = "default_docs_matrix")]
    pub docs_matrix: String,

    /// Directory holding `test_<plugin>.<ext>` files.
    #[serde(default = "default_tests_dir")]
    pub tests_dir: String,

    /// Extension of plugin test files.
    #[serde(default = "default_test_extension")]
    pub test_extension: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            docs_matrix: default_docs_matrix(),
            tests_dir: default_tests_dir(),
            test_extension: default_test_extension(),
        }
    }
}

fn default_docs_matrix() -> String {
    "docs/plugin_matrix.rst".to_string()
}

fn default_tests_dir() -> String {
    "tests/plugins".to_string()
}

fn default_test_extension() -> String {
    "rs".to_string()
}
