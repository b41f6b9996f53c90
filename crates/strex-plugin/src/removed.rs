// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The removed-plugins list (`.removed` in the plugins directory).
//!
//! One plugin name per line. Blank lines and `#` comments are ignored, and a
//! trailing `# ...` on a name line is dropped.

use std::collections::BTreeSet;
use std::path::Path;

use strex_core::StrexError;
use tracing::debug;

/// Default file name of the removed list inside the plugins directory.
pub const REMOVED_FILE_NAME: &str = ".removed";

/// Parse the removed list from its text form.
pub fn load_removed_list(source: &str) -> BTreeSet<String> {
    source
        .lines()
        .filter_map(|line| {
            let name = match line.split_once('#') {
                Some((before, _)) => before,
                None => line,
            }
            .trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Read and parse a removed list from disk. A missing file is an error.
pub fn read_removed_file(path: &Path) -> Result<BTreeSet<String>, StrexError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| StrexError::missing_file(path, e))?;
    let removed = load_removed_list(&content);
    debug!(path = %path.display(), count = removed.len(), "loaded removed plugins list");
    Ok(removed)
}
