// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin catalog consistency checks.
//!
//! Cross-checks the plugin registry against the documentation plugin matrix,
//! the per-plugin test files, the removed-plugins list and the CLI's global
//! argument namespace. Every check collects all of its discrepancies so one
//! run reports every problem.

pub mod checker;
pub mod docs;
pub mod listings;
pub mod testfiles;

pub use checker::{CheckInputs, ConsistencyReport, Discrepancy, run_all};
pub use docs::{parse_plugin_matrix, read_plugin_matrix};
pub use listings::Listings;
pub use testfiles::{list_tested_plugins, tested_plugin_name};
