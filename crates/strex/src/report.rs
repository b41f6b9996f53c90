// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `strex check` and `strex args` command implementations.
//!
//! Both print one status line per consistency check followed by the
//! discrepancies it found, and report failure through the exit status.

use std::collections::BTreeSet;
use std::io::IsTerminal;
use std::path::Path;

use colored::Colorize;
use strex_config::StrexConfig;
use strex_core::{CheckKind, StrexError};
use strex_meta::checker::global_args_valid;
use strex_meta::{CheckInputs, Discrepancy, Listings, run_all};
use strex_plugin::{BUILTIN_PLUGINS, PluginRegistry};

/// Run `strex check`. Returns true when every check passed.
pub fn run_check(
    config: &StrexConfig,
    registry: &PluginRegistry,
    global_namespace: &BTreeSet<String>,
    plain: bool,
    json: bool,
) -> Result<bool, StrexError> {
    let listings = Listings::load(
        Path::new(&config.meta.docs_matrix),
        Path::new(&config.meta.tests_dir),
        &config.meta.test_extension,
        &config.plugins.removed_path(),
    )?;

    let report = run_all(CheckInputs {
        registry,
        documented: &listings.documented,
        tested: &listings.tested,
        removed: &listings.removed,
        global_namespace,
        builtins: &BUILTIN_PLUGINS,
    });

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| StrexError::Serialization(e.to_string()))?;
        println!("{out}");
    } else {
        print!("{}", render_report("strex check", report.checks(), use_color(plain)));
    }
    Ok(report.is_clean())
}

/// Run `strex args`. Returns true when every global argument is valid.
pub fn run_args(registry: &PluginRegistry, global_namespace: &BTreeSet<String>, plain: bool) -> bool {
    let found = global_args_valid(registry, global_namespace);
    let rows = [(CheckKind::GlobalArgsValid, found.as_slice())];
    print!("{}", render_report("strex args", rows, use_color(plain)));
    found.is_empty()
}

fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

/// Render check results in the `[OK]`/`[FAIL]` layout.
pub fn render_report<'a>(
    title: &str,
    checks: impl IntoIterator<Item = (CheckKind, &'a [Discrepancy])>,
    use_color: bool,
) -> String {
    let mut lines = vec![String::new(), format!("  {title}"), format!("  {}", "-".repeat(50))];
    let mut issues = 0;

    for (check, found) in checks {
        issues += found.len();
        let summary = match found.len() {
            0 => "passed".to_string(),
            1 => "1 discrepancy".to_string(),
            n => format!("{n} discrepancies"),
        };

        lines.push(match (found.is_empty(), use_color) {
            (true, true) => format!("    {} {:<20} {summary}", "✓".green(), check.title()),
            (true, false) => format!("    [OK]   {:<20} {summary}", check.title()),
            (false, true) => format!("    {} {:<20} {}", "✗".red(), check.title(), summary.red()),
            (false, false) => format!("    [FAIL] {:<20} {summary}", check.title()),
        });

        for discrepancy in found {
            lines.push(format!("             - {discrepancy}"));
        }
    }

    lines.push(String::new());
    lines.push(match issues {
        0 => "  All checks passed.".to_string(),
        1 => "  1 issue found.".to_string(),
        n => format!("  {n} issues found."),
    });
    lines.push(String::new());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strex_plugin::{ArgumentDescriptor, Plugin, UrlPattern};

    fn discrepancy(check: CheckKind, name: &str, message: &str) -> Discrepancy {
        Discrepancy {
            check,
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn plain_report_lists_failures() {
        let docs = vec![discrepancy(
            CheckKind::PluginHasDocs,
            "youtube",
            "youtube is not in plugin matrix",
        )];
        let rows = [
            (CheckKind::PluginHasDocs, docs.as_slice()),
            (CheckKind::DocsHasPlugin, &[][..]),
        ];
        let text = render_report("strex check", rows, false);

        assert!(text.contains(&format!("    [FAIL] {:<20} 1 discrepancy", "Plugin docs")));
        assert!(text.contains("             - youtube is not in plugin matrix"));
        assert!(text.contains(&format!("    [OK]   {:<20} passed", "Docs entries")));
        assert!(text.contains("  1 issue found."));
    }

    #[test]
    fn clean_report_says_so() {
        let rows = [(CheckKind::GlobalArgsValid, &[][..])];
        let text = render_report("strex args", rows, false);
        assert!(text.contains("  strex args"));
        assert!(text.contains("  All checks passed."));
        assert!(!text.contains("[FAIL]"));
    }

    #[test]
    fn args_command_reports_dangling_global() {
        let mut registry = PluginRegistry::new();
        registry
            .register(
                Plugin::new("twitch")
                    .unwrap()
                    .with_pattern(UrlPattern::new(r"https?://twitch\.tv/").unwrap())
                    .with_argument(ArgumentDescriptor::global("http-proxy")),
            )
            .unwrap();

        let valid: BTreeSet<String> = ["http_proxy".to_string()].into();
        assert!(run_args(&registry, &valid, true));
        assert!(!run_args(&registry, &BTreeSet::new(), true));
    }
}
