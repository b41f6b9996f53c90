// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! URL pattern matching and plugin resolution.
//!
//! Patterns are anchored at the start of the URL, so `https?://example\.com/`
//! matches `https://example.com/live` but not `https://evil.test/?https://example.com/`.
//! Plugins are tried in registration order and each plugin's patterns in
//! declaration order; the first match wins.

use std::collections::BTreeMap;

use regex::Regex;
use strex_core::StrexError;
use tracing::debug;
use url::Url;

use crate::plugin::Plugin;
use crate::registry::PluginRegistry;

/// Scheme given to URLs that do not carry one.
pub const DEFAULT_SCHEME: &str = "https";

/// A compiled URL matching rule.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    regex: Regex,
    name: Option<String>,
}

impl UrlPattern {
    /// Compile a pattern. The pattern is anchored at the start of the input.
    pub fn new(pattern: &str) -> Result<Self, StrexError> {
        let regex = Regex::new(&format!("^(?:{pattern})"))
            .map_err(|e| StrexError::Manifest(format!("invalid URL pattern `{pattern}`: {e}")))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
            name: None,
        })
    }

    /// Attach a matcher name (e.g. `live` or `vod`).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The pattern as written in the manifest.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Optional matcher name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Match a normalized URL, returning the named captures on success.
    pub fn captures(&self, url: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.regex.captures(url)?;
        let named = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|group| caps.name(group).map(|m| (group.to_string(), m.as_str().to_string())))
            .collect();
        Some(named)
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct Resolved<'r> {
    /// The plugin that claimed the URL.
    pub plugin: &'r Plugin,
    /// Index of the matching pattern within the plugin.
    pub pattern_index: usize,
    /// Name of the matching pattern, if it has one.
    pub matcher: Option<&'r str>,
    /// The normalized URL the pattern was applied to.
    pub url: String,
    /// Named capture groups of the matching pattern.
    pub captures: BTreeMap<String, String>,
}

/// Normalize user input into a URL suitable for matching.
///
/// Protocol-relative input (`//host/path`) and input without any scheme get
/// `https`. The result must parse as a URL and name a host.
pub fn normalize_url(input: &str) -> Result<String, StrexError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "URL is empty"));
    }

    let candidate = if let Some(rest) = trimmed.strip_prefix("//") {
        format!("{DEFAULT_SCHEME}://{rest}")
    } else if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}://{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|e| invalid(input, &e.to_string()))?;
    if parsed.cannot_be_a_base() || parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid(input, "URL has no host"));
    }

    Ok(candidate)
}

/// Resolve `url` to the first plugin whose pattern matches it.
///
/// Fails with `InvalidUrl` before any matching when the input is not a URL.
pub fn resolve<'r>(
    registry: &'r PluginRegistry,
    url: &str,
) -> Result<Option<Resolved<'r>>, StrexError> {
    let normalized = normalize_url(url)?;

    for plugin in registry.plugins() {
        if let Some((index, pattern, captures)) = plugin.match_url(&normalized) {
            debug!(
                plugin = %plugin.name(),
                matcher = pattern.name().unwrap_or("-"),
                url = %normalized,
                "resolved URL"
            );
            return Ok(Some(Resolved {
                plugin,
                pattern_index: index,
                matcher: pattern.name(),
                url: normalized,
                captures,
            }));
        }
    }

    debug!(url = %normalized, "no plugin matches URL");
    Ok(None)
}

fn has_scheme(input: &str) -> bool {
    match input.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn invalid(url: &str, reason: &str) -> StrexError {
    StrexError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}
