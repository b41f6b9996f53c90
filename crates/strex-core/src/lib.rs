// SPDX-FileCopyrightText: 2026 Strex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the strex plugin framework.
//!
//! This crate provides the error type and the small set of common types used
//! throughout the strex workspace.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StrexError;
pub use types::{CheckKind, is_valid_plugin_name};
