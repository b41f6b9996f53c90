// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `<name>.toml` files.
//!
//! A manifest declares the plugin's URL matchers (tried in file order) and
//! its CLI arguments. Regexes are compiled while parsing, so a registry never
//! holds a plugin with a broken pattern.

use std::collections::HashSet;

use serde::Deserialize;
use strex_core::StrexError;

use crate::arguments::ArgumentDescriptor;
use crate::matcher::UrlPattern;
use crate::plugin::Plugin;

/// Intermediate TOML deserialization struct for a manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginManifestFile {
    plugin: PluginSection,
}

/// The `[plugin]` section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginSection {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    matchers: Vec<MatcherSection>,
    #[serde(default)]
    arguments: Vec<ArgumentSection>,
}

/// One `[[plugin.matchers]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatcherSection {
    pattern: String,
    name: Option<String>,
}

/// One `[[plugin.arguments]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArgumentSection {
    name: String,
    dest: Option<String>,
    #[serde(default)]
    is_global: bool,
    help: Option<String>,
    metavar: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    sensitive: bool,
}

/// Parse a plugin manifest from TOML content.
///
/// Validates the plugin name, requires at least one matcher, compiles every
/// pattern and rejects duplicate argument names.
pub fn parse_plugin_manifest(toml_content: &str) -> Result<Plugin, StrexError> {
    let file: PluginManifestFile = toml::from_str(toml_content)
        .map_err(|e| StrexError::Manifest(format!("invalid plugin manifest: {e}")))?;

    let section = file.plugin;
    let mut plugin = Plugin::new(section.name)?.with_description(section.description);

    if section.matchers.is_empty() {
        return Err(StrexError::Manifest(format!(
            "plugin `{}` declares no URL matchers",
            plugin.name()
        )));
    }

    for matcher in section.matchers {
        let mut pattern = UrlPattern::new(&matcher.pattern).map_err(|e| match e {
            StrexError::Manifest(msg) => {
                StrexError::Manifest(format!("plugin `{}`: {msg}", plugin.name()))
            }
            other => other,
        })?;
        if let Some(name) = matcher.name {
            pattern = pattern.named(name);
        }
        plugin = plugin.with_pattern(pattern);
    }

    let mut seen = HashSet::new();
    for arg in section.arguments {
        if !is_valid_argument_name(&arg.name) {
            return Err(StrexError::Manifest(format!(
                "plugin `{}`: invalid argument name `{}`",
                plugin.name(),
                arg.name
            )));
        }
        if !seen.insert(arg.name.clone()) {
            return Err(StrexError::Manifest(format!(
                "plugin `{}`: duplicate argument `{}`",
                plugin.name(),
                arg.name
            )));
        }

        let mut descriptor = if arg.is_global {
            ArgumentDescriptor::global(arg.name)
        } else {
            ArgumentDescriptor::new(arg.name)
        }
        .required(arg.required)
        .sensitive(arg.sensitive);
        if let Some(dest) = arg.dest {
            descriptor = descriptor.with_dest(dest);
        }
        if let Some(help) = arg.help {
            descriptor = descriptor.with_help(help);
        }
        if let Some(metavar) = arg.metavar {
            descriptor = descriptor.with_metavar(metavar);
        }
        plugin = plugin.with_argument(descriptor);
    }

    Ok(plugin)
}

/// Argument names become long flags: lowercase words joined by `-`.
fn is_valid_argument_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_manifest() {
        let toml = r#"
[plugin]
name = "twitch"
description = "Twitch live streams and VODs"

[[plugin.matchers]]
name = "vod"
pattern = 'https?://(?:www\.)?twitch\.tv/videos/(?P<video_id>\d+)'

[[plugin.matchers]]
name = "live"
pattern = 'https?://(?:www\.)?twitch\.tv/(?P<channel>\w+)/?$'

[[plugin.arguments]]
name = "disable-ads"
help = "Skip embedded advertisement segments"

[[plugin.arguments]]
name = "api-header"
metavar = "KEY=VALUE"
sensitive = true

[[plugin.arguments]]
name = "http-proxy"
is_global = true
"#;
        let plugin = parse_plugin_manifest(toml).unwrap();
        assert_eq!(plugin.name(), "twitch");
        assert_eq!(plugin.description(), "Twitch live streams and VODs");
        assert_eq!(plugin.patterns().len(), 2);
        assert_eq!(plugin.patterns()[0].name(), Some("vod"));
        assert_eq!(plugin.arguments().len(), 3);

        let ads = &plugin.arguments()[0];
        assert_eq!(ads.dest(), "disable_ads");
        assert_eq!(ads.help(), Some("Skip embedded advertisement segments"));
        assert!(plugin.arguments()[1].is_sensitive());
        assert_eq!(plugin.arguments()[1].metavar(), Some("KEY=VALUE"));
        assert!(plugin.arguments()[2].is_global());
        assert_eq!(plugin.arguments()[2].dest(), "http_proxy");
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[plugin]
name = "minimal"

[[plugin.matchers]]
pattern = 'https://minimal\.tv/'
"#;
        let plugin = parse_plugin_manifest(toml).unwrap();
        assert_eq!(plugin.name(), "minimal");
        assert!(plugin.description().is_empty());
        assert!(plugin.arguments().is_empty());
        assert!(plugin.patterns()[0].name().is_none());
    }

    #[test]
    fn parse_rejects_missing_matchers() {
        let toml = r#"
[plugin]
name = "nothing"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("declares no URL matchers"));
    }

    #[test]
    fn parse_rejects_bad_regex() {
        let toml = r#"
[plugin]
name = "broken"

[[plugin.matchers]]
pattern = 'https://(unclosed'
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("invalid URL pattern"));
        assert!(err.contains("broken"));
    }

    #[test]
    fn parse_rejects_invalid_name() {
        let toml = r#"
[plugin]
name = "bad-name"

[[plugin.matchers]]
pattern = 'https://x\.tv/'
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("invalid plugin name"));
    }

    #[test]
    fn parse_rejects_duplicate_arguments() {
        let toml = r#"
[plugin]
name = "dup"

[[plugin.matchers]]
pattern = 'https://dup\.tv/'

[[plugin.arguments]]
name = "quality"

[[plugin.arguments]]
name = "quality"
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("duplicate argument `quality`"));
    }

    #[test]
    fn parse_rejects_flag_style_argument_names() {
        let toml = r#"
[plugin]
name = "flags"

[[plugin.matchers]]
pattern = 'https://flags\.tv/'

[[plugin.arguments]]
name = "--email"
"#;
        assert!(parse_plugin_manifest(toml).is_err());
    }

    #[test]
    fn parse_rejects_unknown_fields() {
        let toml = r#"
[plugin]
name = "typo"
descripton = "oops"

[[plugin.matchers]]
pattern = 'https://typo\.tv/'
"#;
        let err = parse_plugin_manifest(toml).unwrap_err().to_string();
        assert!(err.contains("invalid plugin manifest"));
    }
}
