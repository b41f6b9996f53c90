// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `strex plugins` command implementation.

use std::fmt::Write as _;

use serde::Serialize;
use strex_core::StrexError;
use strex_plugin::{Plugin, PluginRegistry, is_builtin};

/// Serializable view of one registered plugin.
#[derive(Debug, Serialize)]
pub struct PluginSummary<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub builtin: bool,
    pub matchers: Vec<MatcherSummary<'a>>,
    pub arguments: Vec<ArgumentSummary>,
}

#[derive(Debug, Serialize)]
pub struct MatcherSummary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub pattern: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ArgumentSummary {
    pub flag: String,
    pub dest: String,
    pub global: bool,
    pub required: bool,
}

impl<'a> PluginSummary<'a> {
    pub fn from_plugin(plugin: &'a Plugin) -> Self {
        Self {
            name: plugin.name(),
            description: plugin.description(),
            builtin: is_builtin(plugin.name()),
            matchers: plugin
                .patterns()
                .iter()
                .map(|p| MatcherSummary {
                    name: p.name(),
                    pattern: p.as_str(),
                })
                .collect(),
            arguments: plugin
                .arguments()
                .iter()
                .map(|a| ArgumentSummary {
                    flag: format!("--{}", a.cli_flag(plugin.name())),
                    dest: a.cli_dest(plugin.name()),
                    global: a.is_global(),
                    required: a.is_required(),
                })
                .collect(),
        }
    }
}

/// Run `strex plugins`.
pub fn run_plugins(
    registry: &PluginRegistry,
    search: Option<&str>,
    json: bool,
) -> Result<(), StrexError> {
    let summaries: Vec<_> = registry
        .search(search.unwrap_or_default())
        .into_iter()
        .map(PluginSummary::from_plugin)
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&summaries)
            .map_err(|e| StrexError::Serialization(e.to_string()))?;
        println!("{out}");
    } else {
        print!("{}", render_table(&summaries));
    }
    Ok(())
}

/// One line per plugin, in registration order.
pub fn render_table(summaries: &[PluginSummary<'_>]) -> String {
    if summaries.is_empty() {
        return "No plugins found.\n".to_string();
    }

    let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for summary in summaries {
        let marker = if summary.builtin { "built-in" } else { "" };
        let line = format!("{:<width$}  {marker:<8}  {}", summary.name, summary.description);
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}
