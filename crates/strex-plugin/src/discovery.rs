// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery from a manifest directory and registry assembly.

use std::collections::BTreeSet;
use std::path::Path;

use strex_core::StrexError;
use tracing::{debug, info};

use crate::catalog::builtin_catalog;
use crate::manifest::parse_plugin_manifest;
use crate::plugin::Plugin;
use crate::registry::PluginRegistry;

/// Parse every `*.toml` manifest in `dir`, sorted by file name.
///
/// The file stem must equal the plugin name declared inside the manifest.
pub fn discover_plugins(dir: &Path) -> Result<Vec<Plugin>, StrexError> {
    let entries = std::fs::read_dir(dir).map_err(|e| StrexError::missing_file(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| StrexError::missing_file(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut plugins = Vec::with_capacity(paths.len());
    for path in paths {
        let content =
            std::fs::read_to_string(&path).map_err(|e| StrexError::missing_file(&path, e))?;
        let plugin = parse_plugin_manifest(&content).map_err(|e| in_file(&path, e))?;

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        if stem != plugin.name() {
            return Err(StrexError::Manifest(format!(
                "{}: plugin name `{}` does not match file name `{stem}`",
                path.display(),
                plugin.name()
            )));
        }

        debug!(plugin = %plugin.name(), path = %path.display(), "discovered plugin manifest");
        plugins.push(plugin);
    }

    Ok(plugins)
}

fn in_file(path: &Path, err: StrexError) -> StrexError {
    match err {
        StrexError::Manifest(msg) => StrexError::Manifest(format!("{}: {msg}", path.display())),
        other => other,
    }
}

/// Build a registry from a manifest directory.
///
/// Discovered plugins are registered first, in file-name order, followed by
/// the built-in catalog when `include_builtins` is set. Names in `removed`
/// are refused by the registry, so a manifest for a removed plugin fails
/// the load with `DuplicateName`.
pub fn load_registry(
    dir: &Path,
    removed: BTreeSet<String>,
    include_builtins: bool,
) -> Result<PluginRegistry, StrexError> {
    let mut registry = PluginRegistry::with_removed(removed);

    for plugin in discover_plugins(dir)? {
        registry.register(plugin)?;
    }

    if include_builtins {
        for plugin in builtin_catalog()? {
            registry.register(plugin)?;
        }
    }

    info!(
        plugins = registry.len(),
        removed = registry.removed().len(),
        dir = %dir.display(),
        "plugin registry loaded"
    );
    Ok(registry)
}
