// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-plugin test file listing (`test_<plugin>.<ext>`).

use std::collections::BTreeSet;
use std::path::Path;

use strex_core::StrexError;
use tracing::debug;

/// Plugin name encoded in a test file name, if the file name follows the
/// `test_<plugin>.<ext>` convention.
pub fn tested_plugin_name<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    let stem = file_name
        .strip_prefix("test_")?
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    (!stem.is_empty() && !stem.contains('.')).then_some(stem)
}

/// List the plugins that have a test file in `dir`.
pub fn list_tested_plugins(dir: &Path, extension: &str) -> Result<BTreeSet<String>, StrexError> {
    let entries = std::fs::read_dir(dir).map_err(|e| StrexError::missing_file(dir, e))?;

    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| StrexError::missing_file(dir, e))?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry
            .file_name()
            .to_str()
            .and_then(|f| tested_plugin_name(f, extension))
        {
            names.insert(name.to_string());
        }
    }

    debug!(dir = %dir.display(), count = names.len(), "listed plugin test files");
    Ok(names)
}
