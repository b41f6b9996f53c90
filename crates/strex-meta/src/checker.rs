// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog consistency checks.
//!
//! Each check compares two independently maintained listings of plugin
//! names and returns every discrepancy it finds. Checks only read their
//! inputs, so they can run in any order (or concurrently) with the same result.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use strex_core::CheckKind;
use strex_plugin::{PluginRegistry, validate};
use tracing::info;

/// One named discrepancy found by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    /// The check that found it.
    pub check: CheckKind,
    /// The plugin name the discrepancy is about.
    pub name: String,
    /// Human-readable explanation.
    pub message: String,
}

impl Discrepancy {
    fn new(check: CheckKind, name: &str, message: String) -> Self {
        Self {
            check,
            name: name.to_string(),
            message,
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every non-built-in registered plugin must be documented.
pub fn plugin_has_docs(
    registry: &PluginRegistry,
    documented: &BTreeSet<String>,
    builtins: &[&str],
) -> Vec<Discrepancy> {
    registry
        .keys()
        .filter(|name| !builtins.contains(name) && !documented.contains(*name))
        .map(|name| {
            Discrepancy::new(
                CheckKind::PluginHasDocs,
                name,
                format!("{name} is not in plugin matrix"),
            )
        })
        .collect()
}

/// Every documented name must be a registered plugin.
pub fn docs_has_plugin(registry: &PluginRegistry, documented: &BTreeSet<String>) -> Vec<Discrepancy> {
    documented
        .iter()
        .filter(|name| !registry.contains(name))
        .map(|name| {
            Discrepancy::new(
                CheckKind::DocsHasPlugin,
                name,
                format!("{name} plugin does not exist"),
            )
        })
        .collect()
}

/// Every non-built-in registered plugin must have a test file.
pub fn plugin_has_tests(
    registry: &PluginRegistry,
    tested: &BTreeSet<String>,
    builtins: &[&str],
) -> Vec<Discrepancy> {
    registry
        .keys()
        .filter(|name| !builtins.contains(name) && !tested.contains(*name))
        .map(|name| {
            Discrepancy::new(
                CheckKind::PluginHasTests,
                name,
                format!("{name} has no tests"),
            )
        })
        .collect()
}

/// Every test file must belong to a registered plugin. Built-in names are exempt.
pub fn tested_has_plugin(
    tested: &BTreeSet<String>,
    registry: &PluginRegistry,
    builtins: &[&str],
) -> Vec<Discrepancy> {
    tested
        .iter()
        .filter(|name| !builtins.contains(&name.as_str()) && !registry.contains(name))
        .map(|name| {
            Discrepancy::new(
                CheckKind::TestedHasPlugin,
                name,
                format!("{name} is not a plugin but has tests"),
            )
        })
        .collect()
}

/// No registered plugin may appear in the removed list.
pub fn no_removed_plugin_registered(
    registry: &PluginRegistry,
    removed: &BTreeSet<String>,
) -> Vec<Discrepancy> {
    registry
        .keys()
        .filter(|name| removed.contains(*name))
        .map(|name| {
            Discrepancy::new(
                CheckKind::NoRemovedPluginRegistered,
                name,
                format!("{name} is in removed plugins list"),
            )
        })
        .collect()
}

/// Every global plugin argument must exist in the CLI's argument namespace.
pub fn global_args_valid(
    registry: &PluginRegistry,
    global_namespace: &BTreeSet<String>,
) -> Vec<Discrepancy> {
    validate(registry, global_namespace)
        .into_iter()
        .map(|err| Discrepancy::new(CheckKind::GlobalArgsValid, &err.plugin_name, err.to_string()))
        .collect()
}

/// Everything the checks compare against the registry.
#[derive(Debug, Clone, Copy)]
pub struct CheckInputs<'a> {
    pub registry: &'a PluginRegistry,
    pub documented: &'a BTreeSet<String>,
    pub tested: &'a BTreeSet<String>,
    pub removed: &'a BTreeSet<String>,
    pub global_namespace: &'a BTreeSet<String>,
    pub builtins: &'a [&'a str],
}

/// Results of a full consistency pass, grouped by check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsistencyReport {
    results: BTreeMap<CheckKind, Vec<Discrepancy>>,
}

impl ConsistencyReport {
    /// Discrepancies found by `check` (empty if it passed).
    pub fn for_check(&self, check: CheckKind) -> &[Discrepancy] {
        self.results.get(&check).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every check with its discrepancies, in check order.
    pub fn checks(&self) -> impl Iterator<Item = (CheckKind, &[Discrepancy])> {
        self.results.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// All discrepancies, in check order.
    pub fn discrepancies(&self) -> impl Iterator<Item = &Discrepancy> {
        self.results.values().flatten()
    }

    pub fn total(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Run all checks and collect their discrepancies.
pub fn run_all(inputs: CheckInputs<'_>) -> ConsistencyReport {
    let CheckInputs {
        registry,
        documented,
        tested,
        removed,
        global_namespace,
        builtins,
    } = inputs;

    let results = BTreeMap::from([
        (
            CheckKind::PluginHasDocs,
            plugin_has_docs(registry, documented, builtins),
        ),
        (CheckKind::DocsHasPlugin, docs_has_plugin(registry, documented)),
        (
            CheckKind::PluginHasTests,
            plugin_has_tests(registry, tested, builtins),
        ),
        (
            CheckKind::TestedHasPlugin,
            tested_has_plugin(tested, registry, builtins),
        ),
        (
            CheckKind::NoRemovedPluginRegistered,
            no_removed_plugin_registered(registry, removed),
        ),
        (
            CheckKind::GlobalArgsValid,
            global_args_valid(registry, global_namespace),
        ),
    ]);

    let report = ConsistencyReport { results };
    info!(
        plugins = registry.len(),
        discrepancies = report.total(),
        "consistency checks finished"
    );
    report
}
