// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Plugin` value: a named set of URL patterns and CLI arguments.

use std::collections::BTreeMap;

use strex_core::{StrexError, is_valid_plugin_name};

use crate::arguments::ArgumentDescriptor;
use crate::matcher::UrlPattern;

/// A stream-extraction plugin as seen by the registry.
///
/// Built once during discovery and never mutated after registration; the
/// registry only hands out shared references.
#[derive(Debug, Clone)]
pub struct Plugin {
    name: String,
    description: String,
    patterns: Vec<UrlPattern>,
    arguments: Vec<ArgumentDescriptor>,
}

impl Plugin {
    /// Create an empty plugin. Fails if `name` is not a word-character identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, StrexError> {
        let name = name.into();
        if !is_valid_plugin_name(&name) {
            return Err(StrexError::Manifest(format!(
                "invalid plugin name `{name}`: only letters, digits and `_` are allowed"
            )));
        }
        Ok(Self {
            name,
            description: String::new(),
            patterns: Vec::new(),
            arguments: Vec::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a URL pattern. Patterns are tried in the order they are added.
    pub fn with_pattern(mut self, pattern: UrlPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn with_argument(mut self, argument: ArgumentDescriptor) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn patterns(&self) -> &[UrlPattern] {
        &self.patterns
    }

    pub fn arguments(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    /// Arguments shared with the global CLI namespace.
    pub fn global_arguments(&self) -> impl Iterator<Item = &ArgumentDescriptor> {
        self.arguments.iter().filter(|a| a.is_global())
    }

    /// Try this plugin's patterns in order against a normalized URL.
    pub fn match_url(
        &self,
        url: &str,
    ) -> Option<(usize, &UrlPattern, BTreeMap<String, String>)> {
        self.patterns
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.captures(url).map(|caps| (i, p, caps)))
    }
}
