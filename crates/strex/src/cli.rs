// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command line definition.
//!
//! The static part is derived with clap. Plugin-scoped arguments are only
//! known once the registry is loaded, so they are attached to the `resolve`
//! subcommand at runtime as `--<plugin>-<name>` flags.

use std::collections::BTreeSet;

use clap::{Arg, ArgAction, ArgMatches, Args, Command, CommandFactory, Parser, Subcommand};
use strex_plugin::{ArgumentDescriptor, Plugin, PluginRegistry};
use tracing::warn;

use crate::options::StreamOptions;

/// strex - resolve stream URLs to plugins and keep the plugin catalog consistent.
#[derive(Parser, Debug)]
#[command(name = "strex", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a URL to the plugin that handles it.
    Resolve(ResolveArgs),
    /// List registered plugins.
    Plugins {
        /// Print the catalog as JSON.
        #[arg(long)]
        json: bool,
        /// Only list plugins whose name or description contains QUERY.
        #[arg(long, value_name = "QUERY")]
        search: Option<String>,
    },
    /// Check the catalog against the docs matrix, test files and removed list.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Validate plugin global arguments against the command line.
    Args {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// URL to resolve. A missing scheme defaults to https.
    pub url: String,

    #[command(flatten)]
    pub options: StreamOptions,
}

/// Ids of every argument in `command` and its subcommands.
pub fn global_namespace(command: &Command) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    collect_ids(command, &mut ids);
    ids
}

fn collect_ids(command: &Command, ids: &mut BTreeSet<String>) {
    ids.extend(command.get_arguments().map(|a| a.get_id().to_string()));
    for sub in command.get_subcommands() {
        collect_ids(sub, ids);
    }
}

/// The full command, including plugin-scoped arguments on `resolve`.
///
/// An argument whose id or long flag is already taken is skipped with a warning.
pub fn build_command(registry: &PluginRegistry) -> Command {
    let base = Cli::command();
    let mut taken_ids = global_namespace(&base);
    let mut taken_flags: BTreeSet<String> = base
        .find_subcommand("resolve")
        .into_iter()
        .flat_map(|resolve| resolve.get_arguments())
        .filter_map(|a| a.get_long().map(str::to_string))
        .chain(["help".to_string()])
        .collect();
    let mut plugin_args = Vec::new();

    for plugin in registry.plugins() {
        for argument in plugin.arguments().iter().filter(|a| !a.is_global()) {
            let id = argument.cli_dest(plugin.name());
            let flag = argument.cli_flag(plugin.name());
            if taken_ids.contains(&id) || taken_flags.contains(&flag) {
                warn!(
                    plugin = %plugin.name(),
                    argument = %argument.name(),
                    flag = %flag,
                    "plugin argument collides with an existing option, skipped"
                );
                continue;
            }
            taken_ids.insert(id.clone());
            taken_flags.insert(flag);
            plugin_args.push(plugin_arg(plugin.name(), argument, id));
        }
    }

    base.mut_subcommand("resolve", |resolve| resolve.args(plugin_args))
}

fn plugin_arg(plugin: &str, argument: &ArgumentDescriptor, id: String) -> Arg {
    let mut arg = Arg::new(id)
        .long(argument.cli_flag(plugin))
        .action(ArgAction::Set)
        .help_heading(format!("Plugin options ({plugin})"));
    if let Some(help) = argument.help() {
        arg = arg.help(help.to_string());
    }
    if let Some(metavar) = argument.metavar() {
        arg = arg.value_name(metavar.to_string());
    }
    arg
}

/// Values given for `plugin`'s own arguments, in declaration order.
pub fn plugin_option_values<'p>(
    matches: &ArgMatches,
    plugin: &'p Plugin,
) -> Vec<(&'p ArgumentDescriptor, String)> {
    plugin
        .arguments()
        .iter()
        .filter(|a| !a.is_global())
        .filter_map(|argument| {
            let id = argument.cli_dest(plugin.name());
            matches
                .try_get_one::<String>(&id)
                .ok()
                .flatten()
                .map(|value| (argument, value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::FromArgMatches;
    use strex_plugin::UrlPattern;

    fn registry() -> PluginRegistry {
        let twitch = Plugin::new("twitch")
            .unwrap()
            .with_pattern(UrlPattern::new(r"https?://(?:www\.)?twitch\.tv/(?P<channel>\w+)").unwrap())
            .with_argument(
                ArgumentDescriptor::new("api-header")
                    .with_metavar("KEY=VALUE")
                    .with_help("Extra API header"),
            )
            .with_argument(ArgumentDescriptor::new("low-latency"))
            .with_argument(ArgumentDescriptor::global("http-proxy"));
        let mut registry = PluginRegistry::new();
        registry.register(twitch).unwrap();
        registry
    }

    #[test]
    fn command_definition_is_consistent() {
        build_command(&registry()).debug_assert();
    }

    #[test]
    fn namespace_covers_stream_options_and_subcommand_flags() {
        let ids = global_namespace(&Cli::command());
        for id in ["http_proxy", "http_header", "hls_live_edge", "player", "quality", "url", "json"] {
            assert!(ids.contains(id), "missing {id}");
        }
        assert!(!ids.contains("twitch_api_header"));
    }

    #[test]
    fn plugin_flags_parse_on_resolve() {
        let registry = registry();
        let matches = build_command(&registry)
            .try_get_matches_from([
                "strex",
                "resolve",
                "twitch.tv/foo",
                "--twitch-api-header",
                "Client-Id=abc",
                "--http-proxy",
                "socks5://127.0.0.1:9050",
            ])
            .unwrap();

        let cli = Cli::from_arg_matches(&matches).unwrap();
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.url, "twitch.tv/foo");
        assert_eq!(args.options.http_proxy.as_deref(), Some("socks5://127.0.0.1:9050"));

        let sub = matches.subcommand_matches("resolve").unwrap();
        let plugin = registry.get("twitch").unwrap();
        let values = plugin_option_values(sub, plugin);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].0.name(), "api-header");
        assert_eq!(values[0].1, "Client-Id=abc");
    }

    #[test]
    fn colliding_plugin_argument_is_skipped() {
        // `stream` + `timeout` would claim the `stream_timeout` id.
        let stream = Plugin::new("stream")
            .unwrap()
            .with_pattern(UrlPattern::new("rtmp://").unwrap())
            .with_argument(ArgumentDescriptor::new("timeout"));
        let mut registry = PluginRegistry::new();
        registry.register(stream).unwrap();

        let command = build_command(&registry);
        command.clone().debug_assert();
        let resolve = command.find_subcommand("resolve").unwrap();
        let flags: Vec<_> = resolve.get_arguments().filter_map(|a| a.get_long()).collect();
        assert!(flags.contains(&"stream-timeout"));
        assert_eq!(flags.iter().filter(|f| **f == "stream-timeout").count(), 1);
    }

    #[test]
    fn flag_collision_with_custom_dest_is_skipped() {
        // Id `player_extra` is free but the flag `--player-args` is not.
        let player = Plugin::new("player")
            .unwrap()
            .with_pattern(UrlPattern::new(r"https?://player\.tv/").unwrap())
            .with_argument(ArgumentDescriptor::new("args").with_dest("extra"))
            .with_argument(ArgumentDescriptor::new("volume"));
        let mut registry = PluginRegistry::new();
        registry.register(player).unwrap();

        let command = build_command(&registry);
        command.clone().debug_assert();
        let resolve = command.find_subcommand("resolve").unwrap();
        assert!(resolve.get_arguments().all(|a| a.get_id() != "player_extra"));
        let longs: Vec<_> = resolve.get_arguments().filter_map(|a| a.get_long()).collect();
        assert_eq!(longs.iter().filter(|f| **f == "player-args").count(), 1);

        let matches = command
            .try_get_matches_from(["strex", "resolve", "https://player.tv/x", "--player-volume", "5"])
            .unwrap();
        let sub = matches.subcommand_matches("resolve").unwrap();
        assert_eq!(
            sub.get_one::<String>("player_volume").map(String::as_str),
            Some("5")
        );
    }
}
