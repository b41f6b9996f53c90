// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin-declared CLI arguments and their validation against the global
//! argument namespace.
//!
//! A plugin-scoped argument `disable-ads` of plugin `twitch` is exposed as
//! `--twitch-disable-ads` with destination `twitch_disable_ads`. A global
//! argument is not added to the command line by the plugin; it refers to an
//! argument the CLI already defines, and its destination must exist there.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::warn;

use crate::registry::PluginRegistry;

/// Declaration of one CLI argument understood by a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    name: String,
    dest: String,
    is_global: bool,
    help: Option<String>,
    metavar: Option<String>,
    required: bool,
    sensitive: bool,
}

impl ArgumentDescriptor {
    /// A plugin-scoped argument. The destination defaults to `name` with `-` turned into `_`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let dest = default_dest(&name);
        Self {
            name,
            dest,
            is_global: false,
            help: None,
            metavar: None,
            required: false,
            sensitive: false,
        }
    }

    /// An argument referring to an existing global CLI argument.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            is_global: true,
            ..Self::new(name)
        }
    }

    pub fn with_dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = dest.into();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    pub fn is_global(&self) -> bool {
        self.is_global
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn metavar(&self) -> Option<&str> {
        self.metavar.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    /// Long flag on the command line, without the leading `--`.
    pub fn cli_flag(&self, plugin: &str) -> String {
        if self.is_global {
            self.name.clone()
        } else {
            format!("{plugin}-{}", self.name)
        }
    }

    /// Destination key in the parsed command line.
    pub fn cli_dest(&self, plugin: &str) -> String {
        if self.is_global {
            self.dest.clone()
        } else {
            format!("{plugin}_{}", self.dest)
        }
    }
}

fn default_dest(name: &str) -> String {
    name.trim_start_matches('-').replace('-', "_")
}

/// A global plugin argument whose destination is missing from the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{arg_name}` from plugins.{plugin_name} is not a valid global argument")]
pub struct ValidationError {
    pub plugin_name: String,
    pub arg_name: String,
    pub dest: String,
}

/// Check every global argument of every plugin against `global_namespace`.
///
/// Collects all violations instead of stopping at the first one so a single
/// run reports every broken plugin.
pub fn validate(
    registry: &PluginRegistry,
    global_namespace: &BTreeSet<String>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for plugin in registry.plugins() {
        for arg in plugin.global_arguments() {
            if !global_namespace.contains(arg.dest()) {
                warn!(
                    plugin = %plugin.name(),
                    argument = %arg.name(),
                    dest = %arg.dest(),
                    "global plugin argument has no matching CLI argument"
                );
                errors.push(ValidationError {
                    plugin_name: plugin.name().to_string(),
                    arg_name: arg.name().to_string(),
                    dest: arg.dest().to_string(),
                });
            }
        }
    }

    errors
}
