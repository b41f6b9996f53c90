// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Documentation plugin matrix parsing.
//!
//! The matrix is a reStructuredText page whose simple table lists one plugin
//! per row:
//!
//! ```text
//! Plugins
//! =======
//!
//! Intro text.
//!
//! ========= ============ ===== =====
//! Name      URL(s)       Live  VOD
//! ========= ============ ===== =====
//! twitch    twitch.tv    Yes   Yes
//! youtube   youtube.com  Yes   Yes
//!           youtu.be
//! ========= ============ ===== =====
//! ```
//!
//! Splitting on rule lines yields the title, the intro, the table header and
//! the table body. Plugin names are the words at the start of body lines;
//! continuation lines start with whitespace and are skipped.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use strex_core::StrexError;
use tracing::debug;

/// A title underline or table rule line, including its surrounding newlines.
static RULE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[= ]+\n").unwrap());

/// A plugin name at the start of a table row.
static ROW_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(\w+)\s").unwrap());

/// Index of the table body among the rule-separated parts.
const TABLE_BODY_PART: usize = 3;

/// Extract plugin names from matrix content, in document order.
///
/// CRLF line endings are accepted. Returns `None` when the content has too
/// few rule lines to contain a table body.
pub fn parse_plugin_matrix(content: &str) -> Option<Vec<String>> {
    let content = content.replace("\r\n", "\n");
    let body = RULE_LINE.split(&content).nth(TABLE_BODY_PART)?;
    Some(
        ROW_NAME
            .captures_iter(body)
            .map(|caps| caps[1].to_string())
            .collect(),
    )
}

/// Read and parse the matrix file. A missing file or missing table is an error.
pub fn read_plugin_matrix(path: &Path) -> Result<Vec<String>, StrexError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| StrexError::missing_file(path, e))?;
    let names = parse_plugin_matrix(&content).ok_or_else(|| StrexError::MalformedMatrix {
        path: path.to_path_buf(),
        reason: "expected a title and a plugin table delimited by `=` rule lines".to_string(),
    })?;
    debug!(path = %path.display(), count = names.len(), "parsed plugin matrix");
    Ok(names)
}
