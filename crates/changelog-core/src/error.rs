// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for changelog-core

use thiserror::Error;

/// Errors that can occur while rendering a changelog
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The requested output format is not one of markdown, json or text
    #[error("Invalid format: '{format}'. Supported formats are markdown, json and text.")]
    InvalidFormat {
        /// The format string that was requested
        format: String,
    },

    /// Invalid grouping mode
    #[error("Invalid grouping: '{group_by}'. Supported groupings are category, scope and author.")]
    InvalidGrouping {
        /// The grouping string that was requested
        group_by: String,
    },

    /// Error serializing the document
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
