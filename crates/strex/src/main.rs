// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! strex - stream URL resolver and plugin catalog checker.
//!
//! This is the binary entry point.

mod cli;
mod listing;
mod options;
mod report;
mod resolve;

use std::collections::BTreeSet;
use std::path::Path;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use strex_config::StrexConfig;
use strex_core::StrexError;
use strex_plugin::{PluginRegistry, load_registry, read_removed_file};
use tracing::error;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let config = match strex_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            strex_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.general.log_level);

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("strex: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &StrexConfig) -> Result<bool, StrexError> {
    // The registry is loaded without removed-list enforcement so `check`
    // can report removed plugins instead of refusing to start.
    let registry = match load_registry(
        Path::new(&config.plugins.dir),
        BTreeSet::new(),
        config.plugins.builtins,
    ) {
        Ok(registry) => registry,
        Err(e) => {
            // --help and --version still work without a catalog.
            match Cli::try_parse() {
                Err(parse_error) if is_informational(parse_error.kind()) => parse_error.exit(),
                _ => return Err(e),
            }
        }
    };

    let namespace = cli::global_namespace(&Cli::command());
    let matches = cli::build_command(&registry).get_matches();
    let parsed = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    match (parsed.command, matches.subcommand()) {
        (Commands::Resolve(args), Some((_, sub))) => {
            refuse_removed(&registry, config)?;
            resolve::run_resolve(&registry, &args, sub)
        }
        (Commands::Plugins { json, search }, _) => {
            refuse_removed(&registry, config)?;
            listing::run_plugins(&registry, search.as_deref(), json)?;
            Ok(true)
        }
        (Commands::Check { plain, json }, _) => {
            report::run_check(config, &registry, &namespace, plain, json)
        }
        (Commands::Args { plain }, _) => {
            refuse_removed(&registry, config)?;
            Ok(report::run_args(&registry, &namespace, plain))
        }
        (Commands::Resolve(_), None) => Ok(false),
    }
}

/// Parse outcomes that print help or version instead of reporting an error.
fn is_informational(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

/// Fail if a registered plugin is on the removed list.
fn refuse_removed(registry: &PluginRegistry, config: &StrexConfig) -> Result<(), StrexError> {
    let removed = read_removed_file(&config.plugins.removed_path())?;
    match registry.keys().find(|name| removed.contains(*name)) {
        Some(name) => Err(StrexError::DuplicateName {
            name: name.to_string(),
            removed: true,
        }),
        None => Ok(()),
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strex={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use strex_plugin::{Plugin, UrlPattern};

    fn config_for(dir: &Path) -> StrexConfig {
        let mut config = StrexConfig::default();
        config.plugins.dir = dir.display().to_string();
        config
    }

    fn registry(names: &[&str]) -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        for name in names {
            registry
                .register(
                    Plugin::new(*name)
                        .unwrap()
                        .with_pattern(UrlPattern::new(&format!(r"https://{name}\.example/")).unwrap()),
                )
                .unwrap();
        }
        registry
    }

    #[test]
    fn registered_removed_plugin_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".removed"), "# retired\njustintv\n").unwrap();
        let config = config_for(dir.path());

        assert!(refuse_removed(&registry(&["twitch"]), &config).is_ok());
        let err = refuse_removed(&registry(&["twitch", "justintv"]), &config).unwrap_err();
        assert!(matches!(err, StrexError::DuplicateName { ref name, removed: true } if name == "justintv"));
    }

    #[test]
    fn missing_removed_list_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = refuse_removed(&registry(&["twitch"]), &config_for(dir.path())).unwrap_err();
        assert!(matches!(err, StrexError::MissingFile { .. }));
    }

    #[test]
    fn only_help_and_version_preempt_catalog_errors() {
        assert!(is_informational(ErrorKind::DisplayHelp));
        assert!(is_informational(ErrorKind::DisplayVersion));
        assert!(!is_informational(ErrorKind::UnknownArgument));
        assert!(!is_informational(ErrorKind::MissingRequiredArgument));
    }

    #[test]
    fn default_config_is_valid() {
        let config = strex_config::load_and_validate_str("").expect("defaults should validate");
        assert_eq!(config.general.log_level, "info");
    }
}
