// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Covers constraints serde cannot express: non-empty paths, a known log
//! level and a bare removed-list file name.

use crate::diagnostic::ConfigError;
use crate::model::StrexConfig;

/// Log levels accepted by `general.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &StrexConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |key: &str, message: String| {
        errors.push(ConfigError::Validation {
            key: key.to_string(),
            message,
        });
    };

    let level = config.general.log_level.trim();
    if !LOG_LEVELS.contains(&level) {
        fail(
            "general.log_level",
            format!("`{level}` is not one of {}", LOG_LEVELS.join(", ")),
        );
    }

    for (key, value) in [
        ("plugins.dir", &config.plugins.dir),
        ("plugins.removed_file", &config.plugins.removed_file),
        ("meta.docs_matrix", &config.meta.docs_matrix),
        ("meta.tests_dir", &config.meta.tests_dir),
    ] {
        if value.trim().is_empty() {
            fail(key, "must not be empty".to_string());
        }
    }

    let removed_file = &config.plugins.removed_file;
    if removed_file.contains(['/', '\\']) {
        fail(
            "plugins.removed_file",
            format!("`{removed_file}` must be a file name inside plugins.dir, not a path"),
        );
    }

    let ext = &config.meta.test_extension;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        fail(
            "meta.test_extension",
            format!("`{ext}` must be a non-empty alphanumeric extension without a dot"),
        );
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
