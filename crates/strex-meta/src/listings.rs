// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup loading of the externally maintained plugin listings.

use std::collections::BTreeSet;
use std::path::Path;

use strex_core::StrexError;
use strex_plugin::read_removed_file;

use crate::docs::read_plugin_matrix;
use crate::testfiles::list_tested_plugins;

/// The three listings compared against the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listings {
    /// Plugin names found in the documentation matrix.
    pub documented: BTreeSet<String>,
    /// Plugin names that have a test file.
    pub tested: BTreeSet<String>,
    /// Plugin names in the removed list.
    pub removed: BTreeSet<String>,
}

impl Listings {
    /// Read all three listings. Any unreadable resource aborts the load.
    pub fn load(
        docs_matrix: &Path,
        tests_dir: &Path,
        test_extension: &str,
        removed_file: &Path,
    ) -> Result<Self, StrexError> {
        Ok(Self {
            documented: read_plugin_matrix(docs_matrix)?.into_iter().collect(),
            tested: list_tested_plugins(tests_dir, test_extension)?,
            removed: read_removed_file(removed_file)?,
        })
    }
}
