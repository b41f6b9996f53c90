// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `strex resolve` command implementation.

use std::fmt::Write as _;

use clap::ArgMatches;
use strex_core::StrexError;
use strex_plugin::{PluginRegistry, Resolved};
use tracing::info;

use crate::cli::{ResolveArgs, plugin_option_values};

const MASK: &str = "********";

/// One option that applies to the resolved plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOption {
    pub flag: String,
    pub value: String,
}

/// Run `strex resolve`. Returns false when no plugin handles the URL.
pub fn run_resolve(
    registry: &PluginRegistry,
    args: &ResolveArgs,
    matches: &ArgMatches,
) -> Result<bool, StrexError> {
    let Some(resolved) = registry.resolve(&args.url)? else {
        eprintln!("strex: no plugin can handle URL `{}`", args.url);
        return Ok(false);
    };

    let options = applied_options(&resolved, args, matches)?;
    info!(
        plugin = %resolved.plugin.name(),
        options = options.len(),
        "URL resolved"
    );
    print!("{}", render_resolution(&resolved, &options));
    Ok(true)
}

/// Options set for the resolved plugin: its own arguments, then the global
/// options it binds. Sensitive values are masked.
pub fn applied_options(
    resolved: &Resolved<'_>,
    args: &ResolveArgs,
    matches: &ArgMatches,
) -> Result<Vec<AppliedOption>, StrexError> {
    let plugin = resolved.plugin;
    let given = plugin_option_values(matches, plugin);

    if let Some(missing) = plugin
        .arguments()
        .iter()
        .filter(|a| !a.is_global() && a.is_required())
        .find(|a| !given.iter().any(|(g, _)| g.name() == a.name()))
    {
        return Err(StrexError::MissingArgument {
            plugin: plugin.name().to_string(),
            flag: missing.cli_flag(plugin.name()),
        });
    }

    let mut options: Vec<AppliedOption> = given
        .into_iter()
        .map(|(argument, value)| AppliedOption {
            flag: argument.cli_flag(plugin.name()),
            value: if argument.is_sensitive() { MASK.to_string() } else { value },
        })
        .collect();

    let global_values = args.options.set_values();
    for argument in plugin.global_arguments() {
        for (_, value) in global_values.iter().filter(|(id, _)| *id == argument.dest()) {
            options.push(AppliedOption {
                flag: argument.name().to_string(),
                value: if argument.is_sensitive() {
                    MASK.to_string()
                } else {
                    value.clone()
                },
            });
        }
    }

    Ok(options)
}

/// Human-readable resolution summary.
pub fn render_resolution(resolved: &Resolved<'_>, options: &[AppliedOption]) -> String {
    let mut out = String::new();
    let matcher = match resolved.matcher {
        Some(name) => name.to_string(),
        None => format!("#{}", resolved.pattern_index),
    };

    let _ = writeln!(out, "plugin:  {}", resolved.plugin.name());
    let _ = writeln!(out, "matcher: {matcher}");
    let _ = writeln!(out, "url:     {}", resolved.url);
    for (group, value) in &resolved.captures {
        let _ = writeln!(out, "  {group} = {value}");
    }
    for option in options {
        let _ = writeln!(out, "  --{} = {}", option.flag, option.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::FromArgMatches;
    use strex_plugin::{ArgumentDescriptor, Plugin, UrlPattern};

    use crate::cli::{Cli, Commands, build_command};

    fn registry() -> PluginRegistry {
        let twitch = Plugin::new("twitch")
            .unwrap()
            .with_pattern(
                UrlPattern::new(r"https?://(?:www\.)?twitch\.tv/videos/(?P<video_id>\d+)")
                    .unwrap()
                    .named("vod"),
            )
            .with_pattern(UrlPattern::new(r"https?://(?:www\.)?twitch\.tv/(?P<channel>\w+)").unwrap())
            .with_argument(ArgumentDescriptor::new("api-header"))
            .with_argument(ArgumentDescriptor::new("access-token").sensitive(true))
            .with_argument(ArgumentDescriptor::global("http-proxy"));
        let zattoo = Plugin::new("zattoo")
            .unwrap()
            .with_pattern(UrlPattern::new(r"https?://zattoo\.com/").unwrap())
            .with_argument(ArgumentDescriptor::new("email").required(true));

        let mut registry = PluginRegistry::new();
        registry.register(twitch).unwrap();
        registry.register(zattoo).unwrap();
        registry
    }

    fn parse(registry: &PluginRegistry, argv: &[&str]) -> (ResolveArgs, ArgMatches) {
        let matches = build_command(registry).try_get_matches_from(argv).unwrap();
        let Commands::Resolve(args) = Cli::from_arg_matches(&matches).unwrap().command else {
            panic!("expected resolve");
        };
        let sub = matches.subcommand_matches("resolve").unwrap().clone();
        (args, sub)
    }

    #[test]
    fn options_are_collected_and_masked() {
        let registry = registry();
        let (args, matches) = parse(
            &registry,
            &[
                "strex",
                "resolve",
                "twitch.tv/foo",
                "--twitch-access-token",
                "secret",
                "--twitch-api-header",
                "A=1",
                "--http-proxy",
                "http://proxy:3128",
                "--player",
                "mpv",
            ],
        );
        let resolved = registry.resolve(&args.url).unwrap().unwrap();
        let options = applied_options(&resolved, &args, &matches).unwrap();

        assert_eq!(
            options,
            vec![
                AppliedOption {
                    flag: "twitch-api-header".into(),
                    value: "A=1".into()
                },
                AppliedOption {
                    flag: "twitch-access-token".into(),
                    value: MASK.into()
                },
                AppliedOption {
                    flag: "http-proxy".into(),
                    value: "http://proxy:3128".into()
                },
            ]
        );
    }

    #[test]
    fn missing_required_argument_fails() {
        let registry = registry();
        let (args, matches) = parse(&registry, &["strex", "resolve", "https://zattoo.com/live"]);
        let resolved = registry.resolve(&args.url).unwrap().unwrap();
        let err = applied_options(&resolved, &args, &matches).unwrap_err();
        assert_eq!(err.to_string(), "plugin `zattoo` requires `--zattoo-email`");
    }

    #[test]
    fn required_argument_of_other_plugin_is_ignored() {
        let registry = registry();
        let (args, matches) = parse(&registry, &["strex", "resolve", "twitch.tv/foo"]);
        let resolved = registry.resolve(&args.url).unwrap().unwrap();
        assert!(applied_options(&resolved, &args, &matches).unwrap().is_empty());
    }

    #[test]
    fn rendering_names_matcher_and_captures() {
        let registry = registry();
        let resolved = registry.resolve("https://www.twitch.tv/videos/123").unwrap().unwrap();
        let text = render_resolution(&resolved, &[]);
        assert!(text.contains("plugin:  twitch"));
        assert!(text.contains("matcher: vod"));
        assert!(text.contains("video_id = 123"));

        let resolved = registry.resolve("twitch.tv/foo").unwrap().unwrap();
        let text = render_resolution(&resolved, &[]);
        assert!(text.contains("matcher: #1"));
        assert!(text.contains("url:     https://twitch.tv/foo"));
        assert!(text.contains("channel = foo"));
    }
}
