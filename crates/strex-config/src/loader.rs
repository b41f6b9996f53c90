// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./strex.toml` > `~/.config/strex/strex.toml` > `/etc/strex/strex.toml`
//! with environment variable overrides via `STREX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::StrexConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/strex/strex.toml";

/// Local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "strex.toml";

/// Per-user configuration file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("strex/strex.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/strex/strex.toml` (system-wide)
/// 3. `~/.config/strex/strex.toml` (user XDG config)
/// 4. `./strex.toml` (local directory)
/// 5. `STREX_*` environment variables
pub fn load_config() -> Result<StrexConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<StrexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StrexConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StrexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StrexConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(StrexConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Section names are mapped explicitly rather than splitting on `_`, since
/// keys such as `removed_file` contain underscores themselves:
/// `STREX_PLUGINS_REMOVED_FILE` maps to `plugins.removed_file`.
fn env_provider() -> Env {
    Env::prefixed("STREX_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config key.
pub fn map_env_key(key: &str) -> String {
    ["general_", "plugins_", "meta_"]
        .into_iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .map(|rest| format!("{}.{rest}", section.trim_end_matches('_')))
        })
        .unwrap_or_else(|| key.to_string())
}
