// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry, URL matcher, argument validation and built-in catalog.
//!
//! Plugins are declared by TOML manifests and collected into an explicitly
//! constructed [`PluginRegistry`]. The registry resolves URLs to plugins in
//! registration order and is validated against the CLI's global argument
//! namespace by [`arguments::validate`].

pub mod arguments;
pub mod catalog;
pub mod discovery;
pub mod manifest;
pub mod matcher;
pub mod plugin;
pub mod registry;
pub mod removed;

pub use arguments::{ArgumentDescriptor, ValidationError, validate};
pub use catalog::{BUILTIN_PLUGINS, builtin_catalog, is_builtin};
pub use discovery::{discover_plugins, load_registry};
pub use manifest::parse_plugin_manifest;
pub use matcher::{Resolved, UrlPattern, normalize_url, resolve};
pub use plugin::Plugin;
pub use registry::PluginRegistry;
pub use removed::{REMOVED_FILE_NAME, load_removed_list, read_removed_file};
