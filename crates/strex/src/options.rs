// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stream options shared by every plugin.
//!
//! The argument ids of these options form the global argument namespace
//! that plugins may bind their global arguments to.

use clap::Args;

/// HTTP, transport and playback options.
#[derive(Args, Debug, Clone, Default)]
pub struct StreamOptions {
    /// Proxy for all HTTP and HTTPS requests.
    #[arg(long, value_name = "URL", help_heading = "HTTP options")]
    pub http_proxy: Option<String>,

    /// Extra HTTP header, may be repeated.
    #[arg(long, value_name = "KEY=VALUE", help_heading = "HTTP options")]
    pub http_header: Vec<String>,

    /// Extra HTTP cookie, may be repeated.
    #[arg(long, value_name = "KEY=VALUE", help_heading = "HTTP options")]
    pub http_cookie: Vec<String>,

    /// Extra query string parameter, may be repeated.
    #[arg(long, value_name = "KEY=VALUE", help_heading = "HTTP options")]
    pub http_query_param: Vec<String>,

    /// Ignore proxy environment variables.
    #[arg(long, help_heading = "HTTP options")]
    pub http_ignore_env: bool,

    /// Do not verify TLS certificates.
    #[arg(long, help_heading = "HTTP options")]
    pub http_no_ssl_verify: bool,

    /// General HTTP timeout in seconds.
    #[arg(long, value_name = "SECONDS", help_heading = "HTTP options")]
    pub http_timeout: Option<f64>,

    /// Number of segments from the live edge to start HLS playback at.
    #[arg(long, value_name = "SEGMENTS", help_heading = "Stream transport options")]
    pub hls_live_edge: Option<u32>,

    /// Number of threads fetching HLS segments.
    #[arg(long, value_name = "COUNT", help_heading = "Stream transport options")]
    pub hls_segment_threads: Option<u32>,

    /// Skip HLS segments until this offset (HH:MM:SS).
    #[arg(long, value_name = "OFFSET", help_heading = "Stream transport options")]
    pub hls_start_offset: Option<String>,

    /// Number of threads fetching segments of any segmented stream.
    #[arg(long, value_name = "COUNT", help_heading = "Stream transport options")]
    pub stream_segment_threads: Option<u32>,

    /// Attempts before a segment download is abandoned.
    #[arg(long, value_name = "ATTEMPTS", help_heading = "Stream transport options")]
    pub stream_segment_attempts: Option<u32>,

    /// Read timeout of the stream in seconds.
    #[arg(long, value_name = "SECONDS", help_heading = "Stream transport options")]
    pub stream_timeout: Option<f64>,

    /// Player command receiving the stream.
    #[arg(long, value_name = "COMMAND", help_heading = "Player options")]
    pub player: Option<String>,

    /// Extra player arguments.
    #[arg(long, value_name = "ARGUMENTS", help_heading = "Player options")]
    pub player_args: Option<String>,

    /// Stream quality to select, e.g. `best` or `720p,480p`.
    #[arg(long, value_name = "QUALITY", help_heading = "Stream options")]
    pub quality: Option<String>,
}

impl StreamOptions {
    /// Options that were given on the command line, as `(id, value)` pairs.
    pub fn set_values(&self) -> Vec<(&'static str, String)> {
        let mut set = Vec::new();
        let mut push = |id: &'static str, value: Option<String>| {
            if let Some(value) = value {
                set.push((id, value));
            }
        };

        push("http_proxy", self.http_proxy.clone());
        for header in &self.http_header {
            push("http_header", Some(header.clone()));
        }
        for cookie in &self.http_cookie {
            push("http_cookie", Some(cookie.clone()));
        }
        for param in &self.http_query_param {
            push("http_query_param", Some(param.clone()));
        }
        push("http_ignore_env", self.http_ignore_env.then(|| "true".to_string()));
        push("http_no_ssl_verify", self.http_no_ssl_verify.then(|| "true".to_string()));
        push("http_timeout", self.http_timeout.map(|v| v.to_string()));
        push("hls_live_edge", self.hls_live_edge.map(|v| v.to_string()));
        push("hls_segment_threads", self.hls_segment_threads.map(|v| v.to_string()));
        push("hls_start_offset", self.hls_start_offset.clone());
        push("stream_segment_threads", self.stream_segment_threads.map(|v| v.to_string()));
        push("stream_segment_attempts", self.stream_segment_attempts.map(|v| v.to_string()));
        push("stream_timeout", self.stream_timeout.map(|v| v.to_string()));
        push("player", self.player.clone());
        push("player_args", self.player_args.clone());
        push("quality", self.quality.clone());
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_set_by_default() {
        assert!(StreamOptions::default().set_values().is_empty());
    }

    #[test]
    fn repeated_and_flag_options_listed() {
        let options = StreamOptions {
            http_header: vec!["A=1".into(), "B=2".into()],
            http_no_ssl_verify: true,
            hls_live_edge: Some(3),
            ..Default::default()
        };
        assert_eq!(
            options.set_values(),
            vec![
                ("http_header", "A=1".to_string()),
                ("http_header", "B=2".to_string()),
                ("http_no_ssl_verify", "true".to_string()),
                ("hls_live_edge", "3".to_string()),
            ]
        );
    }
}
