// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! The four protocol plugins compiled into strex. They are exempt from the
//! documentation matrix and test-file checks, and they are registered after
//! discovered plugins so their catch-all patterns (`*.m3u8`, `*.mpd`) never
//! shadow a site plugin.

use strex_core::StrexError;

use crate::manifest::parse_plugin_manifest;
use crate::plugin::Plugin;

/// Names of the built-in plugins.
pub const BUILTIN_PLUGINS: [&str; 4] = ["http", "hls", "dash", "stream"];

/// Returns true if `name` is a built-in plugin.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_PLUGINS.contains(&name)
}

const HTTP_MANIFEST: &str = r#"
[plugin]
name = "http"
description = "Progressive HTTP streams via the httpstream:// scheme"

[[plugin.matchers]]
name = "scheme"
pattern = 'httpstream://(?P<url>\S+)'
"#;

const HLS_MANIFEST: &str = r#"
[plugin]
name = "hls"
description = "HTTP Live Streaming playlists"

[[plugin.matchers]]
name = "scheme"
pattern = 'hls(?:variant)?://(?P<url>\S+)'

[[plugin.matchers]]
name = "extension"
pattern = '(?P<url>\S+\.m3u8(?:\?\S*)?)$'
"#;

const DASH_MANIFEST: &str = r#"
[plugin]
name = "dash"
description = "MPEG-DASH manifests"

[[plugin.matchers]]
name = "scheme"
pattern = 'dash://(?P<url>\S+)'

[[plugin.matchers]]
name = "extension"
pattern = '(?P<url>\S+\.mpd(?:\?\S*)?)$'
"#;

const STREAM_MANIFEST: &str = r#"
[plugin]
name = "stream"
description = "Legacy segmented protocols (HDS, RTMP family)"

[[plugin.matchers]]
name = "scheme"
pattern = '(?P<protocol>hds|akamaihd|rtmp[est]?|rtmfp)://(?P<url>\S+)'
"#;

/// Returns the built-in plugins in registration order.
pub fn builtin_catalog() -> Result<Vec<Plugin>, StrexError> {
    [HTTP_MANIFEST, HLS_MANIFEST, DASH_MANIFEST, STREAM_MANIFEST]
        .into_iter()
        .map(parse_plugin_manifest)
        .collect()
}
